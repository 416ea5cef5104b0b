//! Profile service binary. Default port 4004.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use enroll_core::config::ServiceConfig;
use enroll_core::token::TokenKeys;
use enroll_core::{http, FailoverPool};
use enroll_services::{health, profile, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    http::init_tracing();

    let config = ServiceConfig::from_env(4004);
    let db = FailoverPool::connect(&config.db)?;
    if let Err(e) = schema::ensure_schema(db.primary()).await {
        tracing::warn!(error = %e, "schema setup failed, continuing");
    }

    let keys = Arc::new(TokenKeys::new(&config.jwt_secret));
    let state = Arc::new(profile::ProfileState::new(
        db.clone(),
        keys,
        config.auth_service_url.clone(),
    ));

    let app = profile::router()
        .with_state(state)
        .merge(health::router(
            profile::SERVICE,
            db,
            Some(config.auth_service_url.clone()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    http::serve(config.addr, app).await?;
    Ok(())
}
