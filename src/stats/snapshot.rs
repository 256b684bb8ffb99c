// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/snapshot.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the statistics snapshot served by the stats endpoint,
// located in the stats subdirectory. Field names are part of the public
// JSON shape consumed by dashboards and must stay stable.
//
// Tree Location:
// - src/stats/snapshot.rs (serializable snapshot types)
// - Depends on: serde

use crate::miner::session::SessionSnapshot;
use crate::upstream::{UpstreamEntry, UpstreamView};
use serde::Serialize;

/// One miner's line in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinerStatsEntry {
    pub name: String,
    pub hashrate: u64,
    #[serde(rename = "hashrate24h")]
    pub hashrate_24h: u64,
    #[serde(flatten)]
    pub session: SessionSnapshot,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub warning: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub timeout: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckStats {
    pub variance: f64,
    pub blocks_count: usize,
    /// Configured small window, as written in the config file
    pub window: String,
    pub total_variance: f64,
    pub total_blocks_count: usize,
    pub large_window: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub miners: Vec<MinerStatsEntry>,
    pub hashrate: u64,
    #[serde(rename = "hashrate24h")]
    pub hashrate_24h: u64,
    pub total_miners: usize,
    pub total_online: usize,
    pub timed_out: usize,
    pub upstreams: Vec<UpstreamEntry>,
    pub current: UpstreamView,
    pub url: String,
    pub height: u64,
    pub diff: u64,
    pub luck: LuckStats,
    pub now: i64,
}

// Changelog:
// - v1.0.0 (2025-07-02): Initial snapshot types.
