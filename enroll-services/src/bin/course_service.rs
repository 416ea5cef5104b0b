//! Course service binary. Default port 4002.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use enroll_core::config::ServiceConfig;
use enroll_core::{http, FailoverPool};
use enroll_services::{course, health, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    http::init_tracing();

    let config = ServiceConfig::from_env(4002);
    let db = FailoverPool::connect(&config.db)?;
    if let Err(e) = schema::ensure_schema(db.primary()).await {
        tracing::warn!(error = %e, "schema setup failed, continuing");
    }

    let state = Arc::new(course::CourseState::new(
        db.clone(),
        config.auth_service_url.clone(),
    ));

    let app = course::router()
        .with_state(state)
        .merge(health::router(
            course::SERVICE,
            db,
            Some(config.auth_service_url.clone()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    http::serve(config.addr, app).await?;
    Ok(())
}
