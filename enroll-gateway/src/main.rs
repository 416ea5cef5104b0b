//! Gateway binary. Default port 3000.
//!
//! Serves the static frontend and fronts the five backend services:
//! token validation through the auth service, then RPC fan-out.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use enroll_core::http;

use crate::config::GatewayConfig;
use crate::state::GatewayState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    http::init_tracing();

    let config = GatewayConfig::from_env();
    let addr = config.addr;

    // Unknown paths fall back to index.html so client-side routing works.
    let index = format!("{}/index.html", config.static_dir);
    let spa = ServeDir::new(&config.static_dir).not_found_service(ServeFile::new(index));

    let app = routes::router()
        .with_state(Arc::new(GatewayState::new(config)))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    http::serve(addr, app).await?;
    Ok(())
}
