// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/config.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file loads and validates the proxy's JSON configuration file, located
// in the core subdirectory. Durations are written as human readable strings
// ("15m", "24h") and kept verbatim for display next to their parsed values.
//
// Tree Location:
// - src/core/config.rs (configuration file model)
// - Depends on: serde, serde_json, humantime, thiserror

use log::debug;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const LOG_TARGET: &str = "sha3x::proxy::config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid duration {value:?} for {field}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("Duration for {field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("Invalid listen address {value:?} for {field}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("At least one upstream must be configured")]
    NoUpstreams,

    #[error("Upstream #{index} has an empty name or url")]
    IncompleteUpstream { index: usize },

    #[error("largeLuckWindow ({large}) must not be shorter than luckWindow ({small})")]
    LuckWindowOrder { small: String, large: String },
}

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub proxy: ProxySettings,
    pub upstream: Vec<UpstreamSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySettings {
    /// Miner-facing listen address, shown in the stats URL template
    pub listen: String,
    #[serde(default = "default_stats_listen")]
    pub stats_listen: String,
    pub hashrate_window: String,
    pub luck_window: String,
    pub large_luck_window: String,
    pub client_timeout: String,
    #[serde(default = "default_evict_interval")]
    pub evict_interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSettings {
    pub name: String,
    pub url: String,
    /// Upstream is another pool rather than a daemon
    #[serde(default)]
    pub pool: bool,
}

/// Parsed durations from [`ProxySettings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub hashrate_window: Duration,
    pub luck_window: Duration,
    pub large_luck_window: Duration,
    pub client_timeout: Duration,
    pub evict_interval: Duration,
}

fn default_stats_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_evict_interval() -> String {
    "1m".to_string()
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration =
        humantime::parse_duration(value).map_err(|source| ConfigError::InvalidDuration {
            field,
            value: value.to_string(),
            source,
        })?;
    if duration.is_zero() {
        return Err(ConfigError::ZeroDuration { field });
    }
    Ok(duration)
}

impl Config {
    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: LOG_TARGET, "Loaded {} bytes from {:?}", raw.len(), path);
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.is_empty() {
            return Err(ConfigError::NoUpstreams);
        }
        if let Some(index) = self
            .upstream
            .iter()
            .position(|u| u.name.trim().is_empty() || u.url.trim().is_empty())
        {
            return Err(ConfigError::IncompleteUpstream { index });
        }
        if self.proxy.stats_listen.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidAddress {
                field: "statsListen",
                value: self.proxy.stats_listen.clone(),
            });
        }

        let timings = self.timings()?;
        if timings.large_luck_window < timings.luck_window {
            return Err(ConfigError::LuckWindowOrder {
                small: self.proxy.luck_window.clone(),
                large: self.proxy.large_luck_window.clone(),
            });
        }
        Ok(())
    }

    pub fn timings(&self) -> Result<Timings, ConfigError> {
        let proxy = &self.proxy;
        Ok(Timings {
            hashrate_window: parse_duration("hashrateWindow", &proxy.hashrate_window)?,
            luck_window: parse_duration("luckWindow", &proxy.luck_window)?,
            large_luck_window: parse_duration("largeLuckWindow", &proxy.large_luck_window)?,
            client_timeout: parse_duration("clientTimeout", &proxy.client_timeout)?,
            evict_interval: parse_duration("evictInterval", &proxy.evict_interval)?,
        })
    }

    /// URL template miners are told to connect to
    pub fn display_url(&self) -> String {
        format!("http://{}/miner/<diff>/<id>", self.proxy.listen)
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial configuration file support.
//   - JSON config with proxy timings and the upstream list.
//   - Validation of durations, addresses and luck window ordering.
