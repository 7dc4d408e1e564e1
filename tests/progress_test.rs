use std::time::Duration;

use netify::progress::{PRECOMPLETION_CAP, PROGRESS_DONE, ProgressEstimator, RESOLVED_PROGRESS};

#[test]
fn test_estimate_starts_at_resolved_progress() {
    let estimator = ProgressEstimator::new(9000);
    assert_eq!(estimator.estimate(Duration::ZERO), RESOLVED_PROGRESS);
}

#[test]
fn test_estimate_is_monotonic() {
    let estimator = ProgressEstimator::new(3000);

    let mut last = 0;
    for secs in (0..600).step_by(10) {
        let value = estimator.estimate(Duration::from_secs(secs));
        assert!(value >= last, "progress went backwards at {}s", secs);
        last = value;
    }
}

#[test]
fn test_estimate_never_reaches_done_before_response() {
    let estimator = ProgressEstimator::new(9000);

    // Even far past the expected duration the estimate stays below the cap
    for secs in [0, 60, 600, 3600, 86400] {
        let value = estimator.estimate(Duration::from_secs(secs));
        assert!(value <= PRECOMPLETION_CAP);
        assert!(value < PROGRESS_DONE);
    }

    // And it saturates exactly at the cap eventually
    assert_eq!(
        estimator.estimate(Duration::from_secs(86400)),
        PRECOMPLETION_CAP
    );
}

#[test]
fn test_estimated_batch_count() {
    // ceil(9000 / 300) = 30
    assert_eq!(ProgressEstimator::new(9000).total_batches(), 30);

    // Small playlists still count as one batch
    assert_eq!(ProgressEstimator::new(2).total_batches(), 1);
    assert_eq!(ProgressEstimator::new(0).total_batches(), 1);
}

#[test]
fn test_small_playlist_climbs_faster_than_large() {
    let small = ProgressEstimator::new(100);
    let large = ProgressEstimator::new(9000);

    let at = Duration::from_secs(30);
    assert!(small.estimate(at) >= large.estimate(at));
}
