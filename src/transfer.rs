//! Transfer job orchestration.
//!
//! A job moves through a linear state machine: resolving the source playlist,
//! the gateway's matching/creating round trip, finalizing the outcome, done.
//! Every step can branch to failed; all failures are converted into a
//! `TransferOutcome { success: false }` at this boundary so nothing escapes
//! to the CLI layer as a stray error.
//!
//! Resolution must complete before the transfer call is issued; there is no
//! speculative parallel start. While the gateway round trip is pending the
//! job publishes a cosmetic progress estimate on a watch channel, prints a
//! non-fatal "still working" warning at the configured threshold and enforces
//! the hard client-side ceiling. Cancellation (Ctrl-C) aborts the in-flight
//! request by dropping it, but cannot roll back work the gateway already did;
//! a partially created destination playlist may persist.

use std::{path::PathBuf, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::{
    config,
    error::TransferError,
    gateway,
    management::SessionManager,
    progress::{PROGRESS_DONE, ProgressEstimator, RESOLVED_PROGRESS},
    types::{SourcePlaylist, TransferOutcome, TransferRequestBody, TransferResponse},
    utils, warning,
};

/// Cosmetic progress signal consumed by the CLI renderer. `None` means the
/// bar should be cleared (job failed or not started).
pub type ProgressSender = watch::Sender<Option<u8>>;

/// Cover image for the destination playlist. An uploaded file wins over a
/// plain URL when the user supplies both.
#[derive(Debug, Clone)]
pub enum CoverImage {
    Url(String),
    File(PathBuf),
}

impl CoverImage {
    pub fn choose(url: Option<String>, file: Option<PathBuf>) -> Option<CoverImage> {
        match (file, url) {
            (Some(path), _) => Some(CoverImage::File(path)),
            (None, Some(url)) => Some(CoverImage::Url(url)),
            (None, None) => None,
        }
    }
}

/// A single playlist transfer attempt.
pub struct TransferJob {
    source_url: String,
    custom_name: Option<String>,
    cover: Option<CoverImage>,
    timeout: Duration,
    warn_after: Duration,
}

impl TransferJob {
    pub fn new(
        source_url: String,
        custom_name: Option<String>,
        cover: Option<CoverImage>,
        timeout: Option<Duration>,
    ) -> Self {
        TransferJob {
            source_url,
            custom_name,
            cover,
            timeout: timeout.unwrap_or_else(config::transfer_timeout),
            warn_after: config::transfer_warn_after(),
        }
    }

    /// Resolves the source playlist for preview. Runs strictly before the
    /// transfer round trip; a failure here means the transfer is never
    /// attempted.
    pub async fn resolve(&self) -> Result<SourcePlaylist, TransferError> {
        gateway::resolver::resolve(&self.source_url).await
    }

    /// Runs the matching/creating and finalizing steps against the already
    /// resolved playlist and returns the final report. Never returns an
    /// error: every failure is folded into the outcome, and a 401 from the
    /// gateway clears the stored session on the way out.
    pub async fn run(
        &self,
        playlist: &SourcePlaylist,
        session: &mut SessionManager,
        progress: &ProgressSender,
    ) -> TransferOutcome {
        match self.execute(playlist, session, progress).await {
            Ok(outcome) => {
                let _ = progress.send(Some(PROGRESS_DONE));
                outcome
            }
            Err(e) => {
                if matches!(e, TransferError::AuthExpired) {
                    if let Err(clear_err) = SessionManager::clear().await {
                        warning!("Failed to clear session: {}", clear_err);
                    }
                }
                let _ = progress.send(None);
                TransferOutcome::failed(e.to_string())
            }
        }
    }

    async fn execute(
        &self,
        playlist: &SourcePlaylist,
        session: &mut SessionManager,
        progress: &ProgressSender,
    ) -> Result<TransferOutcome, TransferError> {
        let token = session.get_valid_token().await;
        let cover_url = self.cover_payload().await?;

        let body = TransferRequestBody {
            url: utils::canonicalize_source_url(&self.source_url),
            spotify_token: token,
            custom_name: self.custom_name.clone(),
            cover_url,
        };

        let _ = progress.send(Some(RESOLVED_PROGRESS));

        let estimator = ProgressEstimator::new(playlist.total_track_count);
        let started = Instant::now();

        let request = gateway::transfer::transfer(&body);
        tokio::pin!(request);

        let cancel = tokio::signal::ctrl_c();
        tokio::pin!(cancel);

        let warn_at = tokio::time::sleep(self.warn_after);
        tokio::pin!(warn_at);

        let ceiling = tokio::time::sleep(self.timeout);
        tokio::pin!(ceiling);

        let mut ticker = tokio::time::interval(Duration::from_secs(2));
        let mut warned = false;

        // Dropping `request` on any early exit aborts the in-flight HTTP
        // call; the gateway may still finish the job server-side.
        let response: TransferResponse = loop {
            tokio::select! {
                res = &mut request => break res?,
                _ = ticker.tick() => {
                    let _ = progress.send(Some(estimator.estimate(started.elapsed())));
                }
                _ = &mut warn_at, if !warned => {
                    warned = true;
                    warning!(
                        "Still working: {} tracks across ~{} batches can take a while. Keep waiting or press Ctrl-C to cancel.",
                        playlist.total_track_count,
                        estimator.total_batches()
                    );
                }
                _ = &mut ceiling => return Err(TransferError::Timeout),
                _ = &mut cancel => return Err(TransferError::UserCancelled),
            }
        };

        Ok(build_outcome(playlist, &response, self.custom_name.clone()))
    }

    /// Encodes the cover image for the request body: a local file becomes a
    /// base64 data URL, a plain URL passes through for the gateway to fetch.
    async fn cover_payload(&self) -> Result<Option<String>, TransferError> {
        match &self.cover {
            None => Ok(None),
            Some(CoverImage::Url(url)) => Ok(Some(url.clone())),
            Some(CoverImage::File(path)) => {
                let bytes = async_fs::read(path)
                    .await
                    .map_err(|e| TransferError::Storage(e.to_string()))?;
                Ok(Some(format!(
                    "data:image/jpeg;base64,{}",
                    STANDARD.encode(bytes)
                )))
            }
        }
    }
}

/// Builds the final report from the resolved playlist and the gateway
/// response.
///
/// Per-track status comes from diffing track names against the `missing`
/// list. The aggregate counts use the gateway's authoritative numbers and
/// fall back to the resolved totals when the gateway omits them; the
/// transferred count never exceeds the found count even on inconsistent
/// input. The local track list may be a prefix of the full playlist, so the
/// aggregates are not derived from its length.
pub fn build_outcome(
    playlist: &SourcePlaylist,
    response: &TransferResponse,
    custom_name: Option<String>,
) -> TransferOutcome {
    let track_results = utils::build_track_results(&playlist.tracks, &response.missing);

    let total_found = response.total_tracks.unwrap_or(playlist.total_track_count);
    let total_transferred = response
        .total_transferred
        .unwrap_or_else(|| total_found.saturating_sub(response.missing.len() as u64))
        .min(total_found);

    TransferOutcome {
        success: true,
        message: "Playlist transferred successfully!".to_string(),
        playlist_url: response.playlist_url.clone(),
        playlist_name: custom_name.unwrap_or_else(|| playlist.title.clone()),
        track_results,
        total_found,
        total_transferred,
        batch_details: response.batch_results.clone(),
    }
}
