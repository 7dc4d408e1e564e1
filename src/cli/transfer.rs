use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio::sync::watch;

use crate::{
    cli::preview::render_preview,
    error, info,
    management::SessionManager,
    success,
    transfer::{CoverImage, TransferJob},
    types::{BatchTableRow, TrackTableRow, TransferOutcome},
    warning,
};

/// Runs the full transfer job: resolve, preview, gateway round trip, report.
///
/// The form of the job is strictly sequential: resolution has to succeed
/// before the transfer request goes out, and only one job runs per
/// invocation. Every exit path ends in a rendered outcome with the progress
/// bar torn down, including cancellation.
pub async fn transfer(
    url: String,
    name: Option<String>,
    cover_url: Option<String>,
    cover_file: Option<PathBuf>,
    timeout_minutes: Option<u64>,
) {
    let mut session = match SessionManager::load().await {
        Ok(session) => session,
        Err(_) => {
            error!("Not authenticated. Please run netify auth first.");
        }
    };

    let user = session.current_user();
    info!(
        "Authenticated as {}.",
        user.display_name.as_deref().unwrap_or(&user.id)
    );

    let job = TransferJob::new(
        url,
        name,
        CoverImage::choose(cover_url, cover_file),
        timeout_minutes.map(|m| Duration::from_secs(m * 60)),
    );

    // Step 1: resolve the source playlist for the preview
    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let playlist = match job.resolve().await {
        Ok(playlist) => {
            pb.finish_and_clear();
            playlist
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };

    render_preview(&playlist, false);

    // Step 2: run the transfer with a live progress bar. The bar renders the
    // cosmetic estimate; the returned outcome is the authoritative signal.
    let (tx, mut rx) = watch::channel::<Option<u8>>(Some(0));

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}% {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    bar.set_message("Transferring...");

    let render_bar = bar.clone();
    let renderer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let value = *rx.borrow();
            match value {
                Some(p) => render_bar.set_position(p as u64),
                None => render_bar.set_position(0),
            }
        }
    });

    let outcome = job.run(&playlist, &mut session, &tx).await;

    drop(tx);
    let _ = renderer.await;
    bar.finish_and_clear();

    render_outcome(&outcome);
}

fn render_outcome(outcome: &TransferOutcome) {
    if !outcome.success {
        warning!("{}", outcome.message);
        return;
    }

    success!("{}", outcome.message);
    info!(
        "Transferred {} of {} tracks to \"{}\".",
        outcome.total_transferred,
        outcome.total_found,
        outcome.playlist_name
    );
    if let Some(url) = &outcome.playlist_url {
        info!("Playlist: {}", url);
    }

    if !outcome.track_results.is_empty() {
        let rows: Vec<TrackTableRow> = outcome
            .track_results
            .iter()
            .map(|t| TrackTableRow {
                name: t.name.clone(),
                artist: t.artist.clone(),
                status: t.status.to_string(),
            })
            .collect();
        let table = Table::new(rows);
        println!("{}", table);
    }

    // The displayed list may be a prefix; the aggregate counts are not
    if (outcome.track_results.len() as u64) < outcome.total_found {
        info!(
            "Showing the first {} tracks; counts cover the whole playlist.",
            outcome.track_results.len()
        );
    }

    if let Some(batches) = &outcome.batch_details {
        let rows: Vec<BatchTableRow> = batches
            .iter()
            .map(|b| BatchTableRow {
                batch: b.batch_number,
                tracks: b.total_tracks,
                matched: b.matched_tracks,
                rate: format!("{:.1}%", b.success_rate * 100.0),
            })
            .collect();
        if !rows.is_empty() {
            info!("Per-batch match rates:");
            let table = Table::new(rows);
            println!("{}", table);
        }
    }
}
