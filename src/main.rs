// SHA3x Proxy - Free and Open Source Software Statement
//
// File: src/main.rs
// Version: 3.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Proxy entry point: config, logging, shared state, background sweeps and
// the stats endpoint.

use clap::Parser;
use log::{error, info};
use sha3x_proxy::{
    Config, Result,
    core::types::Args,
    server::ProxyServer,
    utils::{format::FormatUtils, init_logging},
    web_server,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const LOG_TARGET: &str = "sha3x::proxy::main";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    init_logging(args.log_config.as_deref(), &args.log_level)?;

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(target: LOG_TARGET, "❌ Failed to load {:?}: {}", args.config, e);
            eprintln!("💡 See config.sample.json for the expected layout");
            std::process::exit(1);
        }
    };
    if let Some(listen) = &args.stats_listen {
        config.proxy.stats_listen = listen.clone();
    }
    let stats_listen: SocketAddr = config.proxy.stats_listen.parse()?;

    info!(target: LOG_TARGET, "🚀 Starting SHA3x Proxy");
    info!(target: LOG_TARGET, "📍 Miner URL: {}", config.display_url());
    for upstream in &config.upstream {
        info!(target: LOG_TARGET,
            "🔗 Upstream {}: {}{}",
            upstream.name,
            upstream.url,
            if upstream.pool { " (pool)" } else { "" }
        );
    }

    let server = ProxyServer::new(config)?.into_arc();

    tokio::spawn(run_idle_sweep(Arc::clone(&server)));

    tokio::select! {
        _ = web_server::start_web_server(Arc::clone(&server), stats_listen) => {
            error!(target: LOG_TARGET, "❌ Stats server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!(target: LOG_TARGET, "👋 Shutting down");
        }
    }

    Ok(())
}

/// Periodically evict idle miners and log a one-line summary
async fn run_idle_sweep(server: Arc<ProxyServer>) {
    let mut interval = tokio::time::interval(server.timings().evict_interval);
    // First tick fires immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let evicted = server.evict_idle_miners();
        let snapshot = server.stats().snapshot();
        let last_block = match snapshot.current.last_submission_at {
            0 => "never".to_string(),
            at => FormatUtils::format_age(Duration::from_millis(
                u64::try_from(snapshot.now - at).unwrap_or_default(),
            )),
        };
        info!(target: LOG_TARGET,
            "📊 {} miners ({} online, {} evicted) | {} | upstream {}{} | last block {}",
            snapshot.total_miners,
            snapshot.total_online,
            evicted,
            FormatUtils::format_hashrate(snapshot.hashrate as f64),
            snapshot.current.name,
            if snapshot.current.sick { " (sick)" } else { "" },
            last_block
        );
    }
}

// Changelog:
// - v3.0.0 (2025-07-02): Proxy entry point.
//   - Replaced the CPU/GPU/hybrid mining modes with config loading, the idle
//     miner sweep and the stats server.
// - v2.0.0-feature-based: Feature-based mining modes.
