use reqwest::Client;

use crate::{
    config,
    error::TransferError,
    types::{PlaylistInfoResponse, SourcePlaylist},
    utils,
};

/// Resolves a source playlist URL into a normalized preview.
///
/// The URL is canonicalized first (the playlist id is extracted when the link
/// is parseable, otherwise the input passes through unchanged) so the gateway
/// never sees a double-encoded share link. A single read-only request is
/// issued; any non-2xx status or malformed payload fails resolution and the
/// transfer must not be attempted.
///
/// For very large playlists the gateway may enumerate only a prefix of the
/// tracks while still reporting the authoritative `total_tracks_count`; the
/// returned `total_track_count` is therefore never smaller than the number of
/// enumerated tracks.
pub async fn resolve(source_url: &str) -> Result<SourcePlaylist, TransferError> {
    let canonical = utils::canonicalize_source_url(source_url);
    let api_url = format!("{uri}/playlist-info", uri = &config::gateway_url());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .query(&[("url", canonical.as_str())])
        .send()
        .await
        .map_err(|e| TransferError::Resolution(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(TransferError::Resolution(format!(
            "gateway returned HTTP {}: {}",
            status, body
        )));
    }

    let info: PlaylistInfoResponse = response
        .json()
        .await
        .map_err(|e| TransferError::Resolution(format!("malformed playlist info: {}", e)))?;

    Ok(map_playlist_info(info))
}

/// Normalizes the gateway payload into the resolved preview.
///
/// The returned `total_track_count` is never smaller than the number of
/// enumerated tracks, even when the gateway omits the count or reports a
/// stale smaller value.
pub fn map_playlist_info(info: PlaylistInfoResponse) -> SourcePlaylist {
    let enumerated = info.tracks.len() as u64;
    let total_track_count = info.total_tracks_count.unwrap_or(enumerated).max(enumerated);

    SourcePlaylist {
        title: info.playlist_title,
        cover_url: info.cover_url,
        tracks: info.tracks,
        total_track_count,
    }
}
