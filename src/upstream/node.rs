// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/upstream/node.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the per-upstream health and counter state, located in
// the upstream subdirectory. The upstream-call layer reports submissions and
// health check results here; the stats endpoint reads them back.
//
// Tree Location:
// - src/upstream/node.rs (single upstream node state)
// - Depends on: parking_lot, serde, log

use crate::core::config::UpstreamSettings;
use crate::utils::unix_millis;
use log::{info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

const LOG_TARGET: &str = "sha3x::proxy::upstream";

/// Consecutive failures before a node is flagged sick, and consecutive
/// successes before a sick node is trusted again.
pub const HEALTH_THRESHOLD: u64 = 5;

#[derive(Debug, Default)]
struct HealthState {
    sick_rate: u64,
    success_rate: u64,
}

/// One upstream daemon the proxy can forward work to
#[derive(Debug)]
pub struct UpstreamNode {
    pub name: String,
    pub url: String,
    pub pool: bool,
    sick: AtomicBool,
    health: Mutex<HealthState>,
    accepts: AtomicU64,
    rejects: AtomicU64,
    fails_count: AtomicU64,
    last_submission_at: AtomicI64,
}

/// Point-in-time view of an upstream node, as reported by the stats endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamView {
    pub name: String,
    pub url: String,
    pub pool: bool,
    pub sick: bool,
    pub accepts: u64,
    pub rejects: u64,
    pub last_submission_at: i64,
    pub fails_count: u64,
}

impl UpstreamNode {
    pub fn new(name: impl Into<String>, url: impl Into<String>, pool: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            pool,
            sick: AtomicBool::new(false),
            health: Mutex::new(HealthState::default()),
            accepts: AtomicU64::new(0),
            rejects: AtomicU64::new(0),
            fails_count: AtomicU64::new(0),
            last_submission_at: AtomicI64::new(0),
        }
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Self {
        Self::new(settings.name.clone(), settings.url.clone(), settings.pool)
    }

    pub fn sick(&self) -> bool {
        self.sick.load(Ordering::Acquire)
    }

    /// Record a failed call or health check. Returns true if this call
    /// flipped the node to sick.
    pub fn mark_sick(&self) -> bool {
        self.fails_count.fetch_add(1, Ordering::Relaxed);

        let mut health = self.health.lock();
        health.sick_rate += 1;
        health.success_rate = 0;
        if health.sick_rate >= HEALTH_THRESHOLD && !self.sick.swap(true, Ordering::AcqRel) {
            warn!(target: LOG_TARGET,
                "Upstream {} marked sick after {} consecutive failures",
                self.name, health.sick_rate
            );
            return true;
        }
        false
    }

    /// Record a successful call or health check. Returns true if this call
    /// brought a sick node back.
    pub fn mark_alive(&self) -> bool {
        let mut health = self.health.lock();
        health.success_rate += 1;
        if health.success_rate >= HEALTH_THRESHOLD {
            health.sick_rate = 0;
            if self.sick.swap(false, Ordering::AcqRel) {
                info!(target: LOG_TARGET,
                    "Upstream {} is healthy again after {} successes",
                    self.name, health.success_rate
                );
                return true;
            }
        }
        false
    }

    /// Record the upstream's answer to a block submission
    pub fn record_submission(&self, accepted: bool) {
        if accepted {
            self.accepts.fetch_add(1, Ordering::Relaxed);
            self.last_submission_at.store(unix_millis(), Ordering::Relaxed);
        } else {
            self.rejects.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn accepts(&self) -> u64 {
        self.accepts.load(Ordering::Relaxed)
    }

    pub fn rejects(&self) -> u64 {
        self.rejects.load(Ordering::Relaxed)
    }

    pub fn fails_count(&self) -> u64 {
        self.fails_count.load(Ordering::Relaxed)
    }

    pub fn last_submission_at(&self) -> i64 {
        self.last_submission_at.load(Ordering::Relaxed)
    }

    /// Each field is loaded on its own; the counters are independent so the
    /// view is not taken at a single instant.
    pub fn snapshot(&self) -> UpstreamView {
        UpstreamView {
            name: self.name.clone(),
            url: self.url.clone(),
            pool: self.pool,
            sick: self.sick(),
            accepts: self.accepts(),
            rejects: self.rejects(),
            last_submission_at: self.last_submission_at(),
            fails_count: self.fails_count(),
        }
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial upstream node state.
//   - Health flag with sick/alive hysteresis, submission counters, snapshot view.
