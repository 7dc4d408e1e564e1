//! Cosmetic progress estimation for long-running transfers.
//!
//! The gateway performs the whole transfer in a single round trip that can run
//! for many minutes, so there is no real per-batch feedback to display. The
//! estimator simulates a climb keyed to elapsed time and the expected batch
//! count instead. The estimate is display-only; the only authoritative
//! completion signal is the outcome returned by the transfer job itself.

use std::time::Duration;

use crate::utils;

/// Progress value reported right after the source playlist resolved.
pub const RESOLVED_PROGRESS: u8 = 20;

/// Terminal progress value, only ever reported after the gateway responded.
pub const PROGRESS_DONE: u8 = 100;

/// Upper bound the simulated climb may reach before the gateway responds.
/// Completion jumps to 100 only once the real response arrives.
pub const PRECOMPLETION_CAP: u8 = 88;

/// Rough time the gateway spends matching and inserting one batch.
const SECS_PER_BATCH: u64 = 20;

/// Time-based progress estimator for a single transfer job.
///
/// Values are monotonic in elapsed time, start at [`RESOLVED_PROGRESS`] and
/// saturate at [`PRECOMPLETION_CAP`]. Pure apart from the clock supplied by
/// the caller, so tests can assert on it without timing dependence.
pub struct ProgressEstimator {
    total_batches: u32,
}

impl ProgressEstimator {
    pub fn new(total_track_count: u64) -> Self {
        ProgressEstimator {
            total_batches: utils::estimated_batches(total_track_count),
        }
    }

    pub fn total_batches(&self) -> u32 {
        self.total_batches
    }

    /// Estimated progress after `elapsed` time waiting on the gateway.
    pub fn estimate(&self, elapsed: Duration) -> u8 {
        let expected_secs = (self.total_batches as u64 * SECS_PER_BATCH).max(1);
        let climb = (PRECOMPLETION_CAP - RESOLVED_PROGRESS) as u64;
        let gained = (elapsed.as_secs() * climb) / expected_secs;
        RESOLVED_PROGRESS + gained.min(climb) as u8
    }
}
