// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/aggregator.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file assembles the statistics snapshot from the upstream pool, the
// miner registry and the luck tracker, located in the stats subdirectory.
// Apart from pruning expired luck samples it only reads shared state, and it
// never fails: missing data shows up as zeros.
//
// Tree Location:
// - src/stats/aggregator.rs (snapshot assembly)
// - Depends on: upstream, miner, luck, server::template

use super::luck::LuckTracker;
use super::snapshot::{LuckStats, MinerStatsEntry, StatsSnapshot};
use crate::core::config::{Config, ConfigError};
use crate::miner::registry::{LONG_HASHRATE_WINDOW, MinerRegistry};
use crate::server::template::BlockTemplateSource;
use crate::upstream::UpstreamPool;
use crate::utils::unix_millis;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

const LOG_TARGET: &str = "sha3x::proxy::stats";

/// Windows, timeouts and labels the snapshot is computed with
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSettings {
    pub hashrate_window: Duration,
    pub client_timeout: Duration,
    pub luck_window: Duration,
    pub large_luck_window: Duration,
    pub luck_window_label: String,
    pub large_luck_window_label: String,
    pub url: String,
}

impl StatsSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let timings = config.timings()?;
        Ok(Self {
            hashrate_window: timings.hashrate_window,
            client_timeout: timings.client_timeout,
            luck_window: timings.luck_window,
            large_luck_window: timings.large_luck_window,
            luck_window_label: config.proxy.luck_window.clone(),
            large_luck_window_label: config.proxy.large_luck_window.clone(),
            url: config.display_url(),
        })
    }
}

pub struct StatsAggregator {
    upstreams: Arc<UpstreamPool>,
    miners: Arc<MinerRegistry>,
    luck: Arc<LuckTracker>,
    templates: Arc<dyn BlockTemplateSource>,
    settings: StatsSettings,
}

impl StatsAggregator {
    pub fn new(
        upstreams: Arc<UpstreamPool>,
        miners: Arc<MinerRegistry>,
        luck: Arc<LuckTracker>,
        templates: Arc<dyn BlockTemplateSource>,
        settings: StatsSettings,
    ) -> Self {
        Self {
            upstreams,
            miners,
            luck,
            templates,
            settings,
        }
    }

    pub fn settings(&self) -> &StatsSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot_at(unix_millis())
    }

    /// Build the snapshot as of `now` (ms epoch)
    pub fn snapshot_at(&self, now: i64) -> StatsSnapshot {
        let settings = &self.settings;

        let mut miners = Vec::with_capacity(self.miners.len());
        let mut hashrate = 0u64;
        let mut hashrate_24h = 0u64;
        let mut total_online = 0;

        for (name, session) in self.miners.iterate() {
            let rate = session.hashrate(settings.hashrate_window, now);
            let rate_24h = session.hashrate(LONG_HASHRATE_WINDOW, now);
            let snapshot = session.snapshot();
            let status = session.status(now, settings.client_timeout);

            hashrate = hashrate.saturating_add(rate);
            hashrate_24h = hashrate_24h.saturating_add(rate_24h);
            if status.online() {
                total_online += 1;
            }

            miners.push(MinerStatsEntry {
                name,
                hashrate: rate,
                hashrate_24h: rate_24h,
                session: snapshot,
                warning: status.warning,
                timeout: status.timed_out,
            });
        }

        let upstreams = self.upstreams.snapshot_all();
        let current = upstreams
            .iter()
            .find(|entry| entry.current)
            .map(|entry| entry.view.clone())
            .unwrap_or_else(|| self.upstreams.current().snapshot());

        let template = self.templates.current_template().unwrap_or_else(|| {
            debug!(target: LOG_TARGET, "No block template yet, reporting zero height");
            Default::default()
        });

        let windows = self
            .luck
            .compute_and_prune(now, settings.luck_window, settings.large_luck_window);

        let total_miners = miners.len();
        StatsSnapshot {
            miners,
            hashrate,
            hashrate_24h,
            total_miners,
            total_online,
            timed_out: total_miners - total_online,
            upstreams,
            current,
            url: settings.url.clone(),
            height: template.height,
            diff: template.difficulty,
            luck: LuckStats {
                variance: windows.variance,
                blocks_count: windows.blocks_count,
                window: settings.luck_window_label.clone(),
                total_variance: windows.total_variance,
                total_blocks_count: windows.total_blocks_count,
                large_window: settings.large_luck_window_label.clone(),
            },
            now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::template::BlockTemplateCell;
    use crate::upstream::UpstreamNode;

    fn settings() -> StatsSettings {
        StatsSettings {
            hashrate_window: Duration::from_secs(600),
            client_timeout: Duration::from_secs(180),
            luck_window: Duration::from_secs(3600),
            large_luck_window: Duration::from_secs(7200),
            luck_window_label: "1h".to_string(),
            large_luck_window_label: "2h".to_string(),
            url: "http://0.0.0.0:8546/miner/<diff>/<id>".to_string(),
        }
    }

    #[test]
    fn test_empty_state_snapshot() {
        let pool = UpstreamPool::new(vec![UpstreamNode::new("a", "http://a:8545", false)]).unwrap();
        let aggregator = StatsAggregator::new(
            Arc::new(pool),
            Arc::new(MinerRegistry::default()),
            Arc::new(LuckTracker::new()),
            Arc::new(BlockTemplateCell::new()),
            settings(),
        );
        let snap = aggregator.snapshot_at(1_750_000_000_000);
        assert!(snap.miners.is_empty());
        assert_eq!(snap.hashrate, 0);
        assert_eq!(snap.total_miners, 0);
        assert_eq!(snap.timed_out, 0);
        assert_eq!(snap.height, 0);
        assert_eq!(snap.diff, 0);
        assert_eq!(snap.luck.blocks_count, 0);
        assert_eq!(snap.luck.variance, 0.0);
        assert_eq!(snap.current.name, "a");
        assert_eq!(snap.now, 1_750_000_000_000);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["miners"], serde_json::json!([]));
        assert_eq!(json["luck"]["window"], "1h");
        assert_eq!(json["luck"]["largeWindow"], "2h");
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Initial stats aggregation.
