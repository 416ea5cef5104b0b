//! Auth service binary. Default port 4001.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use enroll_core::config::ServiceConfig;
use enroll_core::token::TokenKeys;
use enroll_core::{http, FailoverPool};
use enroll_services::{auth, health, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    http::init_tracing();

    let config = ServiceConfig::from_env(4001);
    let db = FailoverPool::connect(&config.db)?;
    if let Err(e) = schema::ensure_schema(db.primary()).await {
        tracing::warn!(error = %e, "schema setup failed, continuing");
    }

    let keys = Arc::new(TokenKeys::new(&config.jwt_secret));
    let state = Arc::new(auth::AuthState::new(db.clone(), keys));

    let app = auth::router()
        .with_state(state)
        .merge(health::router(auth::SERVICE, db, None))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    http::serve(config.addr, app).await?;
    Ok(())
}
