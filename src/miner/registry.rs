// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/registry.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the concurrent registry of connected miners, located
// in the miner subdirectory. Sessions live in a DashMap so updates for
// different miners do not contend, and counters inside a session are atomics
// so concurrent shares from the same miner are never lost.
//
// Tree Location:
// - src/miner/registry.rs (miner identity -> session map)
// - Depends on: dashmap, session

use super::session::MinerSession;
use crate::core::types::ShareResult;
use crate::utils::{duration_millis, unix_millis};
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

const LOG_TARGET: &str = "sha3x::proxy::miners";

/// Longest hashrate window the stats endpoint reports
pub const LONG_HASHRATE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

pub struct MinerRegistry {
    sessions: DashMap<String, Arc<MinerSession>>,
    retention: Duration,
}

impl Default for MinerRegistry {
    fn default() -> Self {
        Self::new(LONG_HASHRATE_WINDOW)
    }
}

impl MinerRegistry {
    /// `retention` bounds how far back share events are kept; it is raised to
    /// the 24 hour window if shorter.
    pub fn new(retention: Duration) -> Self {
        Self {
            sessions: DashMap::with_capacity(64),
            retention: retention.max(LONG_HASHRATE_WINDOW),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn session_for(&self, miner_id: &str, ip: &str, now: i64) -> Arc<MinerSession> {
        if let Some(existing) = self.sessions.get(miner_id) {
            return Arc::clone(existing.value());
        }
        let session = self
            .sessions
            .entry(miner_id.to_string())
            .or_insert_with(|| {
                debug!(target: LOG_TARGET, "New miner session {} from {}", miner_id, ip);
                Arc::new(MinerSession::new(ip, now))
            });
        Arc::clone(session.value())
    }

    /// Record a share from `miner_id`, creating its session on first contact
    pub fn touch(&self, miner_id: &str, result: ShareResult, ip: &str) {
        self.touch_at(miner_id, result, ip, unix_millis());
    }

    pub fn touch_at(&self, miner_id: &str, result: ShareResult, ip: &str, now: i64) {
        // The shard guard is released before the session is updated
        let session = self.session_for(miner_id, ip, now);
        session.record(result, now, self.retention);
    }

    /// Refresh a miner's heartbeat without recording a share
    pub fn heartbeat(&self, miner_id: &str, ip: &str) {
        self.heartbeat_at(miner_id, ip, unix_millis());
    }

    pub fn heartbeat_at(&self, miner_id: &str, ip: &str, now: i64) {
        self.session_for(miner_id, ip, now).heartbeat(now);
    }

    pub fn session(&self, miner_id: &str) -> Option<Arc<MinerSession>> {
        self.sessions.get(miner_id).map(|s| Arc::clone(s.value()))
    }

    /// Hashrate of one miner over the trailing `window`; 0 for unknown miners
    pub fn hashrate(&self, miner_id: &str, window: Duration) -> u64 {
        self.hashrate_at(miner_id, window, unix_millis())
    }

    pub fn hashrate_at(&self, miner_id: &str, window: Duration, now: i64) -> u64 {
        self.session(miner_id)
            .map(|s| s.hashrate(window, now))
            .unwrap_or(0)
    }

    /// Walk all sessions.
    ///
    /// Weakly consistent: sessions added or removed while the walk is in
    /// progress may or may not be seen. Each call starts a fresh walk. The
    /// walk holds a shard read guard while yielding, so callers must use the
    /// returned handles rather than call back into the registry.
    pub fn iterate(&self) -> impl Iterator<Item = (String, Arc<MinerSession>)> + '_ {
        self.sessions
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
    }

    /// Drop sessions silent for longer than `timeout`. Returns how many went.
    pub fn evict_idle(&self, now: i64, timeout: Duration) -> usize {
        let limit = duration_millis(timeout);
        let mut evicted = 0;
        self.sessions.retain(|miner_id, session| {
            let keep = now - session.last_beat() <= limit;
            if !keep {
                info!(target: LOG_TARGET, "Evicting idle miner {} ({})", miner_id, session.ip());
                evicted += 1;
            }
            keep
        });
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_750_000_000_000;

    #[test]
    fn test_touch_creates_session() {
        let registry = MinerRegistry::default();
        assert!(registry.is_empty());
        registry.touch_at("rig-01", ShareResult::Valid { difficulty: 10 }, "10.0.0.1", NOW);
        registry.touch_at("rig-01", ShareResult::Invalid, "10.0.0.99", NOW + 1);

        assert_eq!(registry.len(), 1);
        let session = registry.session("rig-01").unwrap();
        // First contact fixes the ip
        assert_eq!(session.ip(), "10.0.0.1");
        assert_eq!(session.last_beat(), NOW + 1);
        let snap = session.snapshot();
        assert_eq!(snap.valid_shares, 1);
        assert_eq!(snap.invalid_shares, 1);
    }

    #[test]
    fn test_unknown_miner_has_zero_hashrate() {
        let registry = MinerRegistry::default();
        assert_eq!(registry.hashrate_at("x", Duration::from_secs(60), NOW), 0);

        registry.heartbeat_at("x", "10.0.0.1", NOW);
        assert_eq!(registry.hashrate_at("x", Duration::from_secs(60), NOW), 0);
        assert_eq!(registry.hashrate_at("x", LONG_HASHRATE_WINDOW, NOW), 0);
    }

    #[test]
    fn test_iterate_is_restartable() {
        let registry = MinerRegistry::default();
        for i in 0..5 {
            registry.heartbeat_at(&format!("rig-{}", i), "10.0.0.1", NOW);
        }
        assert_eq!(registry.iterate().count(), 5);
        let mut names: Vec<String> = registry.iterate().map(|(id, _)| id).collect();
        names.sort();
        assert_eq!(names, vec!["rig-0", "rig-1", "rig-2", "rig-3", "rig-4"]);
    }

    #[test]
    fn test_evict_idle() {
        let registry = MinerRegistry::default();
        let timeout = Duration::from_secs(180);
        registry.heartbeat_at("stale", "10.0.0.1", NOW - 180_001);
        registry.heartbeat_at("edge", "10.0.0.2", NOW - 180_000);
        registry.heartbeat_at("fresh", "10.0.0.3", NOW);

        assert_eq!(registry.evict_idle(NOW, timeout), 1);
        assert!(registry.session("stale").is_none());
        assert!(registry.session("edge").is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_retention_never_below_a_day() {
        let registry = MinerRegistry::new(Duration::from_secs(60));
        assert_eq!(registry.retention, LONG_HASHRATE_WINDOW);
        let registry = MinerRegistry::new(Duration::from_secs(48 * 3600));
        assert_eq!(registry.retention, Duration::from_secs(48 * 3600));
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Initial miner registry.
//   - DashMap-backed sessions, touch/heartbeat, hashrate lookup, weakly
//     consistent iteration and idle eviction.
