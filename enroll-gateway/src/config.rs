//! Gateway configuration: listen address, backend URLs, static assets.

use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub auth_url: String,
    pub account_url: String,
    pub course_url: String,
    pub grade_url: String,
    pub profile_url: String,
    pub static_dir: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);
        let url = |key: &str, default_port: u16| {
            get(key).unwrap_or_else(|| format!("http://localhost:{default_port}"))
        };

        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            auth_url: url("AUTH_SERVICE_URL", 4001),
            account_url: url("ACCOUNT_SERVICE_URL", 4006),
            course_url: url("COURSE_SERVICE_URL", 4002),
            grade_url: url("GRADE_SERVICE_URL", 4003),
            profile_url: url("PROFILE_SERVICE_URL", 4004),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "public".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GatewayConfig::from_lookup(|_| None);
        assert_eq!(cfg.addr.port(), 3000);
        assert_eq!(cfg.auth_url, "http://localhost:4001");
        assert_eq!(cfg.account_url, "http://localhost:4006");
        assert_eq!(cfg.static_dir, "public");
    }

    #[test]
    fn overrides() {
        let cfg = GatewayConfig::from_lookup(|k| match k {
            "PORT" => Some("8080".into()),
            "COURSE_SERVICE_URL" => Some("http://course.internal:9000".into()),
            _ => None,
        });
        assert_eq!(cfg.addr.port(), 8080);
        assert_eq!(cfg.course_url, "http://course.internal:9000");
        assert_eq!(cfg.grade_url, "http://localhost:4003");
    }
}
