use netify::transfer::{CoverImage, build_outcome};
use netify::types::{
    BatchStats, SourcePlaylist, SourceTrack, TrackStatus, TransferOutcome, TransferResponse,
};

fn playlist(title: &str, tracks: Vec<(&str, &str)>, total: u64) -> SourcePlaylist {
    SourcePlaylist {
        title: title.to_string(),
        cover_url: Some("https://x/y.jpg".to_string()),
        tracks: tracks
            .into_iter()
            .map(|(name, artist)| SourceTrack {
                name: name.to_string(),
                artist: artist.to_string(),
            })
            .collect(),
        total_track_count: total,
    }
}

fn response(missing: Vec<&str>) -> TransferResponse {
    TransferResponse {
        playlist_url: Some("https://open.spotify.com/playlist/abc".to_string()),
        missing: missing.into_iter().map(|m| m.to_string()).collect(),
        total_tracks: None,
        total_transferred: None,
        batch_results: None,
        completed_batches: None,
        processed_batches: None,
    }
}

#[test]
fn test_outcome_marks_missing_tracks_failed() {
    let playlist = playlist("Chill", vec![("A", "X"), ("B", "Y")], 2);
    let mut resp = response(vec!["B"]);
    resp.total_tracks = Some(2);
    resp.total_transferred = Some(1);

    let outcome = build_outcome(&playlist, &resp, None);

    assert!(outcome.success);
    assert_eq!(
        outcome.playlist_url.as_deref(),
        Some("https://open.spotify.com/playlist/abc")
    );
    assert_eq!(outcome.playlist_name, "Chill");
    assert_eq!(outcome.total_found, 2);
    assert_eq!(outcome.total_transferred, 1);

    assert_eq!(outcome.track_results.len(), 2);
    assert_eq!(outcome.track_results[0].name, "A");
    assert_eq!(outcome.track_results[0].status, TrackStatus::Success);
    assert_eq!(outcome.track_results[1].name, "B");
    assert_eq!(outcome.track_results[1].status, TrackStatus::Failed);
}

#[test]
fn test_outcome_totals_fall_back_to_resolved_counts() {
    // Gateway omitted the aggregate counts
    let playlist = playlist("Mix", vec![("A", "X"), ("B", "Y"), ("C", "Z")], 3);
    let resp = response(vec!["C"]);

    let outcome = build_outcome(&playlist, &resp, None);

    assert_eq!(outcome.total_found, 3);
    assert_eq!(outcome.total_transferred, 2);
}

#[test]
fn test_outcome_uses_authoritative_total_for_partial_listing() {
    // Only a prefix of a large playlist was enumerated locally
    let playlist = playlist("Huge", vec![("A", "X"), ("B", "Y")], 9000);
    let resp = response(vec![]);

    let outcome = build_outcome(&playlist, &resp, None);

    // Aggregates reflect the full job, not the displayed subset
    assert_eq!(outcome.total_found, 9000);
    assert_eq!(outcome.track_results.len(), 2);
}

#[test]
fn test_outcome_clamps_transferred_to_found() {
    let playlist = playlist("Odd", vec![("A", "X")], 1);
    let mut resp = response(vec![]);
    resp.total_tracks = Some(1);
    resp.total_transferred = Some(5);

    let outcome = build_outcome(&playlist, &resp, None);

    assert!(outcome.total_transferred <= outcome.total_found);
    assert_eq!(outcome.total_transferred, 1);
}

#[test]
fn test_outcome_custom_name_wins() {
    let playlist = playlist("Original", vec![("A", "X")], 1);
    let resp = response(vec![]);

    let outcome = build_outcome(&playlist, &resp, Some("Renamed".to_string()));
    assert_eq!(outcome.playlist_name, "Renamed");
}

#[test]
fn test_outcome_carries_batch_details() {
    let playlist = playlist("Big", vec![("A", "X")], 600);
    let mut resp = response(vec![]);
    resp.batch_results = Some(vec![
        BatchStats {
            batch_number: 1,
            total_tracks: 300,
            matched_tracks: 290,
            success_rate: 0.9666,
        },
        BatchStats {
            batch_number: 2,
            total_tracks: 300,
            matched_tracks: 300,
            success_rate: 1.0,
        },
    ]);

    let outcome = build_outcome(&playlist, &resp, None);

    let batches = outcome.batch_details.expect("batch details present");
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].batch_number, 1);
}

#[test]
fn test_failed_outcome_shape() {
    let outcome = TransferOutcome::failed("Spotify session expired.".to_string());

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Spotify session expired.");
    assert!(outcome.playlist_url.is_none());
    assert!(outcome.track_results.is_empty());
    assert_eq!(outcome.total_transferred, 0);
}

#[test]
fn test_cover_image_precedence() {
    // Explicit file wins over URL when both are given
    let both = CoverImage::choose(
        Some("https://x/cover.jpg".to_string()),
        Some("cover.jpg".into()),
    );
    assert!(matches!(both, Some(CoverImage::File(_))));

    let url_only = CoverImage::choose(Some("https://x/cover.jpg".to_string()), None);
    assert!(matches!(url_only, Some(CoverImage::Url(_))));

    assert!(CoverImage::choose(None, None).is_none());
}
