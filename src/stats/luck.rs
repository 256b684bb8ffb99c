// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/luck.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements block luck tracking, located in the stats
// subdirectory. Each found block stores the ratio of work spent to network
// difficulty; averages are taken over a small and a large rolling window and
// samples past the large window are deleted during that same scan.
//
// Tree Location:
// - src/stats/luck.rs (luck samples and windowed averages)
// - Depends on: parking_lot

use crate::utils::duration_millis;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

const LOG_TARGET: &str = "sha3x::proxy::luck";

/// Averages over the two luck windows
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LuckWindows {
    pub variance: f64,
    pub blocks_count: usize,
    pub total_variance: f64,
    pub total_blocks_count: usize,
}

#[derive(Debug, Default)]
pub struct LuckTracker {
    // Block found timestamp (ms) -> variance
    samples: Mutex<HashMap<i64, f64>>,
}

impl LuckTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the variance of a block found at `timestamp`, replacing any
    /// sample already stored for that millisecond.
    pub fn record(&self, timestamp: i64, variance: f64) {
        self.samples.lock().insert(timestamp, variance);
    }

    /// Record a found block from the work accumulated during its round.
    /// Ignored when the network difficulty is unknown.
    pub fn record_round(&self, timestamp: i64, round_work: u64, network_difficulty: u64) {
        if network_difficulty == 0 {
            debug!(target: LOG_TARGET, "Skipping luck sample at {}: no network difficulty", timestamp);
            return;
        }
        self.record(timestamp, round_work as f64 / network_difficulty as f64);
    }

    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }

    /// Average the samples in both windows and delete those older than the
    /// large one, in a single pass under the lock.
    ///
    /// Samples between the two windows are kept; they still count towards the
    /// large-window average.
    pub fn compute_and_prune(&self, now: i64, small_window: Duration, large_window: Duration) -> LuckWindows {
        let small_from = now - duration_millis(small_window);
        let large_from = now - duration_millis(large_window);

        let mut small_sum = 0.0;
        let mut large_sum = 0.0;
        let mut result = LuckWindows::default();

        let mut samples = self.samples.lock();
        let before = samples.len();
        samples.retain(|timestamp, variance| {
            if *timestamp >= small_from {
                result.blocks_count += 1;
                small_sum += *variance;
            }
            if *timestamp >= large_from {
                result.total_blocks_count += 1;
                large_sum += *variance;
                true
            } else {
                false
            }
        });
        let pruned = before - samples.len();
        drop(samples);

        if pruned > 0 {
            debug!(target: LOG_TARGET, "Pruned {} expired luck samples", pruned);
        }
        if result.blocks_count != 0 {
            result.variance = small_sum / result.blocks_count as f64;
        }
        if result.total_blocks_count != 0 {
            result.total_variance = large_sum / result.total_blocks_count as f64;
        }
        result
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial luck tracking.
//   - Mutex-guarded samples, combined average-and-prune scan over two windows.
