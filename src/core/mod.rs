// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the core functionality of the
// proxy, located in the core subdirectory. It declares submodules and
// re-exports key types for use throughout the project.

pub mod config;
pub mod difficulty;
pub mod types;

// Re-export the most commonly used items
pub use config::{Config, ConfigError, Timings, UpstreamSettings};
pub use difficulty::{
    DifficultyError, U512, difficulty_to_target, target_to_difficulty,
    target_to_share_difficulty,
};
pub use types::{Args, BlockTemplate, ShareResult};

// Changelog:
// - v2.0.0 (2025-07-02): Reworked for the proxy.
//   - Dropped the hashing modules; added config and the target codec exports.
// - v1.0.1 (2025-06-16): Added simple SHA-256 support.
