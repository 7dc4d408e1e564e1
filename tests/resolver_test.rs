use netify::gateway::resolver::map_playlist_info;
use netify::types::{PlaylistInfoResponse, SourceTrack};

fn info(tracks: Vec<(&str, &str)>, total: Option<u64>) -> PlaylistInfoResponse {
    PlaylistInfoResponse {
        playlist_title: "Mix".to_string(),
        cover_url: Some("https://x/y.jpg".to_string()),
        tracks: tracks
            .into_iter()
            .map(|(name, artist)| SourceTrack {
                name: name.to_string(),
                artist: artist.to_string(),
            })
            .collect(),
        total_tracks_count: total,
    }
}

#[test]
fn test_map_playlist_info_carries_metadata() {
    let playlist = map_playlist_info(info(vec![("A", "X"), ("B", "Y")], Some(2)));

    assert_eq!(playlist.title, "Mix");
    assert_eq!(playlist.cover_url.as_deref(), Some("https://x/y.jpg"));
    assert_eq!(playlist.tracks.len(), 2);
    assert_eq!(playlist.total_track_count, 2);
}

#[test]
fn test_map_playlist_info_total_falls_back_to_enumerated() {
    // Gateway omitted the count entirely
    let playlist = map_playlist_info(info(vec![("A", "X"), ("B", "Y"), ("C", "Z")], None));
    assert_eq!(playlist.total_track_count, 3);
}

#[test]
fn test_map_playlist_info_total_never_undercounts_enumerated() {
    // A stale count smaller than the enumerated list is corrected upward
    let playlist = map_playlist_info(info(vec![("A", "X"), ("B", "Y")], Some(1)));
    assert_eq!(playlist.total_track_count, 2);
    assert!(playlist.total_track_count >= playlist.tracks.len() as u64);
}

#[test]
fn test_map_playlist_info_keeps_authoritative_total_for_partial_listing() {
    // Only a prefix of a large playlist was enumerated
    let playlist = map_playlist_info(info(vec![("A", "X"), ("B", "Y")], Some(9000)));
    assert_eq!(playlist.total_track_count, 9000);
    assert_eq!(playlist.tracks.len(), 2);
}
