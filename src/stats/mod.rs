// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the statistics functionality of
// the proxy, located in the stats subdirectory.
//
// Tree Location:
// - src/stats/mod.rs (stats module entry point)
// - Submodules: aggregator, luck, snapshot

pub mod aggregator;
pub mod luck;
pub mod snapshot;

// Re-export key types for convenience
pub use aggregator::{StatsAggregator, StatsSettings};
pub use luck::{LuckTracker, LuckWindows};
pub use snapshot::{LuckStats, MinerStatsEntry, StatsSnapshot};

// Changelog:
// - v1.0.0 (2025-07-02): Initial stats module.
