//! Shift Roster - Axum Server
//!
//! Run with: cargo run
//! Then open: http://localhost:7860

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;
use tracing_subscriber::EnvFilter;

use shift_roster::api;
use shift_roster::config::ServerConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::from_default_env().add_directive(
        "shift_roster=info"
            .parse()
            .unwrap_or_else(|_| tracing::Level::INFO.into()),
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();

    #[cfg(feature = "console")]
    shift_roster::console::print_banner();

    let config = ServerConfig::from_env();
    let state = Arc::new(api::AppState::new());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    #[cfg(feature = "console")]
    shift_roster::console::print_listening(&addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
