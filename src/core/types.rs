// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines core data structures for the proxy, located in the core
// subdirectory. It includes the command-line arguments, the outcome of a
// share reported by the miner-facing protocol layer, and the block template
// summary the stats endpoint displays.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: clap, serde

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command-line arguments for the proxy
#[derive(Parser, Debug)]
#[command(
    name = "sha3x-proxy",
    author = "SHA3x Mining Team",
    version,
    about = "Mining proxy with upstream failover, per-miner hashrate and luck statistics",
    long_about = "SHA3x Proxy sits between connected miners and one or more upstream daemon nodes.\n\
                  It fails over between upstreams, tracks per-miner share activity and serves\n\
                  a JSON statistics snapshot over HTTP.\n\n\
                  Examples:\n\
                    sha3x-proxy --config config.json\n\
                    sha3x-proxy --config config.json --stats-listen 127.0.0.1:9090 --log-config log4rs.yml"
)]
pub struct Args {
    /// Path to the JSON configuration file
    #[arg(
        short,
        long,
        default_value = "config.json",
        value_name = "FILE",
        help = "Proxy configuration file (JSON)"
    )]
    pub config: PathBuf,

    /// Optional log4rs YAML configuration; console logging is used when absent
    #[arg(
        long = "log-config",
        value_name = "FILE",
        help = "log4rs configuration file (YAML)"
    )]
    pub log_config: Option<PathBuf>,

    /// Override the stats HTTP listen address from the config file
    #[arg(
        long = "stats-listen",
        value_name = "HOST:PORT",
        help = "Stats endpoint listen address (overrides config)"
    )]
    pub stats_listen: Option<String>,

    /// Console log level used when no log4rs file is given
    #[arg(
        long = "log-level",
        default_value = "info",
        value_name = "LEVEL",
        help = "Console log level [error, warn, info, debug, trace]"
    )]
    pub log_level: String,
}

/// Outcome of a single share as classified by the miner protocol layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShareResult {
    /// Share failed validation
    Invalid,

    /// Share met the assigned difficulty
    Valid { difficulty: u64 },

    /// Share also met the network target and the upstream took the block
    BlockAccepted { difficulty: u64 },

    /// Share met the network target but the upstream refused the block
    BlockRejected,
}

impl ShareResult {
    /// Difficulty credited towards hashrate, if the share counts as work
    pub fn credited_difficulty(&self) -> Option<u64> {
        match self {
            ShareResult::Valid { difficulty } | ShareResult::BlockAccepted { difficulty } => {
                Some(*difficulty)
            }
            ShareResult::Invalid | ShareResult::BlockRejected => None,
        }
    }
}

/// Height and network difficulty of the template currently being mined
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTemplate {
    pub height: u64,
    pub difficulty: u64,
}

impl Args {
    /// Validate arguments and return helpful errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref listen) = self.stats_listen {
            if listen.parse::<std::net::SocketAddr>().is_err() {
                return Err(format!(
                    "Stats listen address must be in format HOST:PORT, got '{}'",
                    listen
                ));
            }
        }

        match self.log_level.to_ascii_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["sha3x-proxy"]);
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert!(args.log_config.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_args_validation() {
        let args = Args::parse_from(["sha3x-proxy", "--stats-listen", "nowhere"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["sha3x-proxy", "--log-level", "loud"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["sha3x-proxy", "--stats-listen", "127.0.0.1:9090"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_credited_difficulty() {
        assert_eq!(ShareResult::Valid { difficulty: 40 }.credited_difficulty(), Some(40));
        assert_eq!(
            ShareResult::BlockAccepted { difficulty: 7 }.credited_difficulty(),
            Some(7)
        );
        assert_eq!(ShareResult::Invalid.credited_difficulty(), None);
        assert_eq!(ShareResult::BlockRejected.credited_difficulty(), None);
    }
}

// Changelog:
// - v2.0.0 (2025-07-02): Reworked for the proxy.
//   - Replaced miner arguments with proxy arguments (config, log config,
//     stats listen override, log level).
//   - Replaced pool job and share types with ShareResult and BlockTemplate.
// - v1.1.1-web (2025-06-22): Added web dashboard support.
