use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{PkceChallenge, SourceTrack, TrackResult, TrackStatus};

/// Number of tracks the gateway processes per batch during a transfer.
pub const BATCH_SIZE: u64 = 300;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce_challenge() -> PkceChallenge {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);
    PkceChallenge {
        verifier,
        challenge,
    }
}

/// Normalizes a NetEase playlist URL to its canonical form.
///
/// Share links come in several shapes (`y.music.163.com/m/playlist?id=...`,
/// `music.163.com/#/playlist?id=...`). When a numeric `id=` parameter can be
/// extracted the URL is rebuilt around it; otherwise the input passes through
/// unchanged so the gateway sees exactly what the user pasted.
pub fn canonicalize_source_url(url: &str) -> String {
    match extract_playlist_id(url) {
        Some(id) => format!("https://music.163.com/playlist?id={}", id),
        None => url.to_string(),
    }
}

/// Extracts the numeric playlist id from a source URL, if present.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    let cleaned = url.replace("#/", "");
    let start = cleaned.find("id=")? + 3;
    let digits: String = cleaned[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Number of server-side batches a playlist of `total_tracks` is split into.
/// Always at least one, so progress estimation never divides by zero.
pub fn estimated_batches(total_tracks: u64) -> u32 {
    let batches = total_tracks.div_ceil(BATCH_SIZE).max(1);
    batches as u32
}

/// Marks each source track failed exactly when its name appears in the
/// gateway's `missing` list, success otherwise. Order follows the source list.
pub fn build_track_results(tracks: &[SourceTrack], missing: &[String]) -> Vec<TrackResult> {
    let missing_set: HashSet<&str> = missing.iter().map(|m| m.as_str()).collect();

    tracks
        .iter()
        .map(|t| TrackResult {
            name: t.name.clone(),
            artist: t.artist.clone(),
            status: if missing_set.contains(t.name.as_str()) {
                TrackStatus::Failed
            } else {
                TrackStatus::Success
            },
        })
        .collect()
}
