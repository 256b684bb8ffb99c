// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/miner/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for tracking the miners connected to
// the proxy, located in the miner subdirectory.
//
// Tree Location:
// - src/miner/mod.rs (miner module entry point)
// - Submodules: registry, session

pub mod registry;
pub mod session;

// Re-export key types for convenience
pub use registry::{LONG_HASHRATE_WINDOW, MinerRegistry};
pub use session::{MinerSession, MinerStatus, SessionSnapshot};

// Changelog:
// - v2.0.0 (2025-07-02): Reworked for the proxy.
//   - Replaced the CPU/GPU miners and their stats with the registry of
//     connected miner sessions.
// - v1.1.0 (2025-06-24): Added GPU mining module.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
