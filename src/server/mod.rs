// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/server/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the proxy server instance that owns all shared state,
// located in the server subdirectory. It is built once at startup and handed
// to every task by Arc; nothing is reached through globals.
//
// Tree Location:
// - src/server/mod.rs (server state owner)
// - Submodules: template

pub mod template;

use crate::core::config::{Config, ConfigError, Timings};
use crate::miner::MinerRegistry;
use crate::stats::{LuckTracker, StatsAggregator, StatsSettings};
use crate::upstream::{UpstreamError, UpstreamPool};
use crate::utils::unix_millis;
use log::info;
use std::sync::Arc;
use thiserror::Error;

pub use template::{BlockTemplateCell, BlockTemplateSource};

const LOG_TARGET: &str = "sha3x::proxy::server";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid configuration")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid upstream setup")]
    Upstream {
        #[from]
        source: UpstreamError,
    },
}

pub struct ProxyServer {
    config: Config,
    timings: Timings,
    upstreams: Arc<UpstreamPool>,
    miners: Arc<MinerRegistry>,
    luck: Arc<LuckTracker>,
    templates: Arc<BlockTemplateCell>,
    stats: StatsAggregator,
}

impl ProxyServer {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config.validate()?;
        let timings = config.timings()?;
        let settings = StatsSettings::from_config(&config)?;

        let upstreams = Arc::new(UpstreamPool::from_settings(&config.upstream)?);
        let miners = Arc::new(MinerRegistry::new(timings.hashrate_window));
        let luck = Arc::new(LuckTracker::new());
        let templates = Arc::new(BlockTemplateCell::new());

        let template_source: Arc<dyn BlockTemplateSource> = templates.clone();
        let stats = StatsAggregator::new(
            Arc::clone(&upstreams),
            Arc::clone(&miners),
            Arc::clone(&luck),
            template_source,
            settings,
        );

        info!(target: LOG_TARGET,
            "Proxy configured with {} upstream(s), default {}",
            upstreams.len(),
            upstreams.current().name
        );

        Ok(Self {
            config,
            timings,
            upstreams,
            miners,
            luck,
            templates,
            stats,
        })
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn upstreams(&self) -> &Arc<UpstreamPool> {
        &self.upstreams
    }

    pub fn miners(&self) -> &Arc<MinerRegistry> {
        &self.miners
    }

    pub fn luck(&self) -> &Arc<LuckTracker> {
        &self.luck
    }

    pub fn templates(&self) -> &Arc<BlockTemplateCell> {
        &self.templates
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Drop miner sessions idle for longer than the client timeout
    pub fn evict_idle_miners(&self) -> usize {
        self.miners.evict_idle(unix_millis(), self.timings.client_timeout)
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial server state owner.
