// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/web_server.rs
// Version: 2.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the HTTP stats endpoint. It serves the proxy's
// statistics snapshot as JSON; the response is always well formed, with
// zeros where the proxy has no data yet.
//
// Tree Location:
// - src/web_server.rs (stats HTTP server)
// - Depends on: axum, tower-http, server, stats

use crate::server::ProxyServer;
use crate::stats::StatsSnapshot;
use axum::{Json, Router, extract::State, routing::get};
use log::{debug, error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

const LOG_TARGET: &str = "sha3x::proxy::web_server";

/// Routes served by the stats server
pub fn router(server: Arc<ProxyServer>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Start the stats server
///
/// Serves the snapshot at http://<listen>/stats until the listener fails
pub async fn start_web_server(server: Arc<ProxyServer>, listen: SocketAddr) {
    let app = router(server);

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(target: LOG_TARGET,"❌ Failed to bind stats server to {}: {}", listen, e);
            error!(target: LOG_TARGET,"💡 Make sure {} is not already in use", listen);
            return;
        }
    };

    info!(target: LOG_TARGET,"📊 Stats available at: http://{}/stats", listen);

    if let Err(e) = axum::serve(listener, app).await {
        error!(target: LOG_TARGET,"❌ Stats server error: {}", e);
    }
}

/// Handler for the stats snapshot
async fn stats_handler(State(server): State<Arc<ProxyServer>>) -> Json<StatsSnapshot> {
    let snapshot = server.stats().snapshot();
    debug!(target: LOG_TARGET,
        "📄 Serving stats: {} miners, {} online",
        snapshot.total_miners, snapshot.total_online
    );
    Json(snapshot)
}

// Changelog:
// - v2.0.0 (2025-07-02): Reworked for the proxy.
//   - Replaced the dashboard page and WebSocket stream with GET /stats.
//   - Moved into the library so the router can be exercised from tests.
//   - Listen address comes from configuration instead of a fixed port.
// - v1.0.1 (2025-06-23): Updated for 1-second updates.
// - v1.0.0 (2025-06-22): Initial web server implementation.
