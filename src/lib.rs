// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file serves as the main library entry point for the proxy, located at
// the root of the source tree. It exports all public modules and types that
// the binary and integration tests use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: core, miner, server, stats, upstream, utils, web_server

pub mod core;
pub mod miner;
pub mod server;
pub mod stats;
pub mod upstream;
pub mod utils;
pub mod web_server;

// Re-export commonly used types at the crate root for convenience
pub use crate::core::{Config, ShareResult, difficulty};
pub use crate::miner::MinerRegistry;
pub use crate::server::ProxyServer;
pub use crate::stats::{LuckTracker, StatsAggregator, StatsSnapshot};
pub use crate::upstream::{UpstreamNode, UpstreamPool};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Changelog:
// - v2.0.0 (2025-07-02): Reworked the library root for the proxy.
//   - Replaced the miner, pool, benchmark and help exports with the upstream,
//     miner registry, stats and server modules.
//   - The web server now lives in the library.
// - v1.0.2 (2025-06-15): Added help module support.
// - v1.0.0 (2025-06-14): Initial modular breakout from monolithic main.rs.
