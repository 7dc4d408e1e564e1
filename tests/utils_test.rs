use netify::types::SourceTrack;
use netify::utils::*;

fn track(name: &str, artist: &str) -> SourceTrack {
    SourceTrack {
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    // SHA-256 digest encoded without padding is always 43 characters
    assert_eq!(challenge.len(), 43);
}

#[test]
fn test_generate_pkce_challenge_pair() {
    let pkce = generate_pkce_challenge();

    // Challenge must be derived from the verifier
    assert_eq!(pkce.challenge, generate_code_challenge(&pkce.verifier));
    assert_eq!(pkce.verifier.len(), 128);
}

#[test]
fn test_extract_playlist_id() {
    // Mobile share link
    assert_eq!(
        extract_playlist_id("https://y.music.163.com/m/playlist?id=123456"),
        Some("123456".to_string())
    );

    // Hash-router form
    assert_eq!(
        extract_playlist_id("https://music.163.com/#/playlist?id=42&userid=9"),
        Some("42".to_string())
    );

    // Trailing parameters after the id
    assert_eq!(
        extract_playlist_id("https://music.163.com/playlist?id=777&from=share"),
        Some("777".to_string())
    );

    // No id present
    assert_eq!(extract_playlist_id("https://music.163.com/playlist"), None);

    // Non-numeric id
    assert_eq!(
        extract_playlist_id("https://music.163.com/playlist?id=abc"),
        None
    );
}

#[test]
fn test_canonicalize_source_url() {
    // Parseable links are rebuilt around the extracted id
    assert_eq!(
        canonicalize_source_url("https://y.music.163.com/m/playlist?id=123456"),
        "https://music.163.com/playlist?id=123456"
    );
    assert_eq!(
        canonicalize_source_url("https://music.163.com/#/playlist?id=42"),
        "https://music.163.com/playlist?id=42"
    );

    // Unparseable input passes through unchanged
    let opaque = "https://example.com/some/playlist";
    assert_eq!(canonicalize_source_url(opaque), opaque);
}

#[test]
fn test_estimated_batches() {
    // Never zero, even for an empty playlist
    assert_eq!(estimated_batches(0), 1);
    assert_eq!(estimated_batches(1), 1);

    // Exactly one batch boundary
    assert_eq!(estimated_batches(BATCH_SIZE), 1);
    assert_eq!(estimated_batches(BATCH_SIZE + 1), 2);

    // 9000 tracks split into 30 batches of 300
    assert_eq!(estimated_batches(9000), 30);
}

#[test]
fn test_build_track_results_missing_set() {
    let tracks = vec![track("A", "X"), track("B", "Y")];
    let missing = vec!["B".to_string()];

    let results = build_track_results(&tracks, &missing);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "A");
    assert_eq!(results[0].status.to_string(), "success");
    assert_eq!(results[1].name, "B");
    assert_eq!(results[1].status.to_string(), "failed");
}

#[test]
fn test_build_track_results_preserves_order_and_artists() {
    let tracks = vec![track("C", "Z"), track("A", "X"), track("B", "Y")];
    let results = build_track_results(&tracks, &[]);

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert!(results.iter().all(|r| r.status.to_string() == "success"));
    assert_eq!(results[1].artist, "X");
}

#[test]
fn test_build_track_results_empty_inputs() {
    assert!(build_track_results(&[], &["B".to_string()]).is_empty());

    // A missing entry with no matching track marks nothing
    let tracks = vec![track("A", "X")];
    let results = build_track_results(&tracks, &["Z".to_string()]);
    assert_eq!(results[0].status.to_string(), "success");
}
