// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for utility functions in the proxy,
// located in the utils subdirectory.
//
// Tree Location:
// - src/utils/mod.rs (utils module entry point)
// - Submodules: format, logging, time

pub mod format;
pub mod logging;
pub mod time;

pub use logging::init_logging;
pub use time::{duration_millis, unix_millis};

// Changelog:
// - v1.1.0 (2025-07-02): Added time (millisecond timestamps) and logging
//   (log4rs setup) submodules.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
