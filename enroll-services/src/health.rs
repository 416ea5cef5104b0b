//! The `/health` endpoint every service binary mounts.
//!
//! Reports database liveness per pool and, for services that depend on
//! the auth service, a short upstream ping. Unreachable database means
//! 503 so orchestrators stop routing traffic here.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use enroll_core::FailoverPool;

const UPSTREAM_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Health router for one service. `auth_url` is set for the services
/// that sit behind the auth service's verify endpoint.
pub fn router<S>(service: &'static str, db: FailoverPool, auth_url: Option<String>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let http = reqwest::Client::new();
    Router::new().route(
        "/health",
        get(move || check(service, db.clone(), auth_url.clone(), http.clone())),
    )
}

async fn check(
    service: &'static str,
    db: FailoverPool,
    auth_url: Option<String>,
    http: reqwest::Client,
) -> Response {
    let db_health = db.health().await;

    let mut dependencies = json!({ "database": db_health });
    if let Some(url) = &auth_url {
        let status = if ping(&http, url).await {
            "healthy"
        } else {
            "unavailable"
        };
        dependencies["authService"] = json!(status);
    }

    let timestamp = Utc::now().to_rfc3339();
    if db_health.reachable() {
        Json(json!({
            "success": true,
            "service": service,
            "status": "healthy",
            "dependencies": dependencies,
            "timestamp": timestamp,
        }))
        .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "service": service,
                "status": "unhealthy",
                "error": "Database unavailable",
                "dependencies": dependencies,
                "timestamp": timestamp,
            })),
        )
            .into_response()
    }
}

async fn ping(http: &reqwest::Client, base_url: &str) -> bool {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    match http
        .get(&url)
        .timeout(UPSTREAM_PING_TIMEOUT)
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::config::DbConfig;
    use tower::ServiceExt;

    fn dead_db() -> FailoverPool {
        FailoverPool::connect(&DbConfig {
            primary_url: "postgres://u:p@127.0.0.1:1/db".into(),
            replica_url: "postgres://u:p@127.0.0.1:1/db".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn unreachable_database_is_503() {
        let app: Router = router("course-service", dead_db(), None);
        let resp = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["dependencies"]["database"]["primary"], false);
    }

    #[tokio::test]
    async fn unreachable_auth_service_is_reported_but_not_fatal() {
        let app: Router = router(
            "grade-service",
            dead_db(),
            Some("http://127.0.0.1:1".into()),
        );
        let resp = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // The frontend's health poll keys off this exact vocabulary.
        assert_eq!(body["dependencies"]["authService"], "unavailable");
    }
}
