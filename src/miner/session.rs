// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/session.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements per-miner session statistics, located in the miner
// subdirectory. A session counts shares by outcome, remembers the last
// heartbeat and keeps difficulty-weighted share events for hashrate windows.
//
// Tree Location:
// - src/miner/session.rs (per-miner session state)
// - Depends on: parking_lot, serde

use crate::core::types::ShareResult;
use crate::utils::duration_millis;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

pub struct MinerSession {
    ip: String,
    started_at: i64,
    last_beat: AtomicI64,
    valid_shares: AtomicU64,
    invalid_shares: AtomicU64,
    accepts: AtomicU64,
    rejects: AtomicU64,
    // Share timestamp (ms) -> summed difficulty of shares in that millisecond
    shares: Mutex<BTreeMap<i64, u64>>,
}

/// Counters of a session read at one moment (each counter loaded on its own)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub ip: String,
    pub last_beat: i64,
    pub valid_shares: u64,
    pub invalid_shares: u64,
    pub accepts: u64,
    pub rejects: u64,
}

/// Liveness of a session derived from its last heartbeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinerStatus {
    /// Silent for more than half the timeout
    pub warning: bool,
    /// Silent for more than the timeout
    pub timed_out: bool,
}

impl MinerStatus {
    pub fn classify(last_beat: i64, now: i64, timeout: Duration) -> Self {
        let silence = now - last_beat;
        Self {
            warning: silence > duration_millis(timeout / 2),
            timed_out: silence > duration_millis(timeout),
        }
    }

    pub fn online(&self) -> bool {
        !self.timed_out
    }
}

impl MinerSession {
    pub fn new(ip: impl Into<String>, now: i64) -> Self {
        Self {
            ip: ip.into(),
            started_at: now,
            last_beat: AtomicI64::new(now),
            valid_shares: AtomicU64::new(0),
            invalid_shares: AtomicU64::new(0),
            accepts: AtomicU64::new(0),
            rejects: AtomicU64::new(0),
            shares: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn last_beat(&self) -> i64 {
        self.last_beat.load(Ordering::Relaxed)
    }

    /// Move the heartbeat forward; an older timestamp never rewinds it.
    pub fn heartbeat(&self, now: i64) {
        self.last_beat.fetch_max(now, Ordering::Relaxed);
    }

    /// Count a share and keep its difficulty for hashrate. Share events older
    /// than `retention` are dropped here so the read path stays read-only.
    pub fn record(&self, result: ShareResult, now: i64, retention: Duration) {
        match result {
            ShareResult::Invalid => {
                self.invalid_shares.fetch_add(1, Ordering::Relaxed);
            }
            ShareResult::Valid { .. } => {
                self.valid_shares.fetch_add(1, Ordering::Relaxed);
            }
            ShareResult::BlockAccepted { .. } => {
                self.accepts.fetch_add(1, Ordering::Relaxed);
                self.valid_shares.fetch_add(1, Ordering::Relaxed);
            }
            ShareResult::BlockRejected => {
                self.rejects.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Some(difficulty) = result.credited_difficulty() {
            let cutoff = now - duration_millis(retention);
            let mut shares = self.shares.lock();
            *shares.entry(now).or_insert(0) += difficulty;
            if shares.first_key_value().is_some_and(|(ts, _)| *ts < cutoff) {
                *shares = shares.split_off(&cutoff);
            }
        }
        self.heartbeat(now);
    }

    /// Hashes per second over the trailing `window` ending at `now`.
    ///
    /// Sums the difficulty of shares with `timestamp >= now - window` and
    /// divides by the full window length.
    pub fn hashrate(&self, window: Duration, now: i64) -> u64 {
        let seconds = window.as_secs_f64();
        if seconds <= 0.0 {
            return 0;
        }
        let from = now - duration_millis(window);
        let total: u64 = {
            let shares = self.shares.lock();
            shares.range(from..).map(|(_, difficulty)| *difficulty).sum()
        };
        (total as f64 / seconds) as u64
    }

    /// Number of distinct share timestamps currently retained
    pub fn share_events(&self) -> usize {
        self.shares.lock().len()
    }

    pub fn status(&self, now: i64, timeout: Duration) -> MinerStatus {
        MinerStatus::classify(self.last_beat(), now, timeout)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ip: self.ip.clone(),
            last_beat: self.last_beat(),
            valid_shares: self.valid_shares.load(Ordering::Relaxed),
            invalid_shares: self.invalid_shares.load(Ordering::Relaxed),
            accepts: self.accepts.load(Ordering::Relaxed),
            rejects: self.rejects.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_750_000_000_000;
    const DAY: Duration = Duration::from_secs(24 * 3600);

    #[test]
    fn test_record_counts_by_outcome() {
        let session = MinerSession::new("10.0.0.5", NOW);
        session.record(ShareResult::Valid { difficulty: 100 }, NOW, DAY);
        session.record(ShareResult::Invalid, NOW, DAY);
        session.record(ShareResult::BlockAccepted { difficulty: 100 }, NOW, DAY);
        session.record(ShareResult::BlockRejected, NOW, DAY);

        let snap = session.snapshot();
        assert_eq!(snap.ip, "10.0.0.5");
        assert_eq!(snap.valid_shares, 2);
        assert_eq!(snap.invalid_shares, 1);
        assert_eq!(snap.accepts, 1);
        assert_eq!(snap.rejects, 1);
        // Two credited shares in the same millisecond share one event
        assert_eq!(session.share_events(), 1);
    }

    #[test]
    fn test_hashrate_window() {
        let session = MinerSession::new("10.0.0.5", NOW - 3_600_000);
        let window = Duration::from_secs(600);
        session.record(ShareResult::Valid { difficulty: 60_000 }, NOW - 10_000, DAY);
        session.record(ShareResult::Valid { difficulty: 60_000 }, NOW - 599_000, DAY);
        // Outside the 10 minute window
        session.record(ShareResult::Valid { difficulty: 999_999 }, NOW - 700_000, DAY);
        // Not credited
        session.record(ShareResult::Invalid, NOW - 1_000, DAY);

        assert_eq!(session.hashrate(window, NOW), 120_000 / 600);
        assert_eq!(session.hashrate(Duration::ZERO, NOW), 0);
    }

    #[test]
    fn test_no_shares_no_hashrate() {
        let session = MinerSession::new("10.0.0.5", NOW);
        assert_eq!(session.hashrate(Duration::from_secs(60), NOW), 0);
        assert_eq!(session.hashrate(DAY, NOW), 0);
    }

    #[test]
    fn test_old_share_events_pruned_on_write() {
        let session = MinerSession::new("10.0.0.5", NOW - 2 * 86_400_000);
        session.record(ShareResult::Valid { difficulty: 5 }, NOW - 86_400_001, DAY);
        assert_eq!(session.share_events(), 1);
        session.record(ShareResult::Valid { difficulty: 5 }, NOW, DAY);
        assert_eq!(session.share_events(), 1);
    }

    #[test]
    fn test_heartbeat_never_rewinds() {
        let session = MinerSession::new("10.0.0.5", NOW);
        session.heartbeat(NOW - 5_000);
        assert_eq!(session.last_beat(), NOW);
        session.heartbeat(NOW + 5_000);
        assert_eq!(session.last_beat(), NOW + 5_000);
    }

    #[test]
    fn test_status_thresholds() {
        let timeout = Duration::from_secs(180);
        let tau = 180_000;

        let fresh = MinerStatus::classify(NOW - 1_000, NOW, timeout);
        assert_eq!(fresh, MinerStatus::default());
        assert!(fresh.online());

        let warned = MinerStatus::classify(NOW - tau / 2 - 1, NOW, timeout);
        assert!(warned.warning);
        assert!(!warned.timed_out);

        // Exactly at the timeout is still online
        let edge = MinerStatus::classify(NOW - tau, NOW, timeout);
        assert!(edge.online());

        let gone = MinerStatus::classify(NOW - tau - 1, NOW, timeout);
        assert!(gone.warning);
        assert!(gone.timed_out);
        assert!(!gone.online());
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Initial miner session tracking.
//   - Atomic share counters, difficulty-weighted share events with retention,
//     trailing-window hashrate and heartbeat classification.
