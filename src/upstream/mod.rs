// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/upstream/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for upstream node tracking, located in
// the upstream subdirectory.
//
// Tree Location:
// - src/upstream/mod.rs (upstream module entry point)
// - Submodules: node, pool

pub mod node;
pub mod pool;

// Re-export key types for convenience
pub use node::{HEALTH_THRESHOLD, UpstreamNode, UpstreamView};
pub use pool::{UpstreamEntry, UpstreamError, UpstreamPool};

// Changelog:
// - v1.0.0 (2025-07-02): Initial upstream module.
