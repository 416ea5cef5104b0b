//! Composite health: ping every backend concurrently.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use futures::future::join_all;
use serde_json::json;

use crate::state::GatewayState;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn check(State(state): State<Arc<GatewayState>>) -> Response {
    let backends = [
        ("authService", &state.config.auth_url),
        ("accountService", &state.config.account_url),
        ("courseService", &state.config.course_url),
        ("gradeService", &state.config.grade_url),
        ("profileService", &state.config.profile_url),
    ];

    let pings = join_all(
        backends
            .iter()
            .map(|(name, url)| async { (*name, ping(&state.http, url).await) }),
    )
    .await;

    let mut dependencies = serde_json::Map::new();
    for (name, up) in pings {
        dependencies.insert(
            name.to_owned(),
            json!(if up { "healthy" } else { "unavailable" }),
        );
    }

    // The gateway itself is stateless; it reports healthy whenever it can
    // answer, with per-backend reachability alongside.
    Json(json!({
        "success": true,
        "service": "gateway",
        "status": "healthy",
        "dependencies": dependencies,
        "timestamp": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

async fn ping(http: &reqwest::Client, base_url: &str) -> bool {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    match http.get(&url).timeout(PING_TIMEOUT).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    #[tokio::test]
    async fn reports_unreachable_backends() {
        let state = Arc::new(GatewayState::new(GatewayConfig::from_lookup(|k| {
            k.ends_with("_SERVICE_URL").then(|| "http://127.0.0.1:1".to_string())
        })));
        let resp = check(State(state)).await;
        assert_eq!(resp.status(), axum::http::StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "gateway");
        assert_eq!(body["dependencies"]["authService"], "unavailable");
        assert_eq!(body["dependencies"]["gradeService"], "unavailable");
    }
}
