//! Origin allow-list: CORS headers for allowed origins and a 403 gate for everything else.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use reqwest::Url;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{config::normalize_origin, error::ApiError};

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Configured origins plus any loopback origin.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: origins
                .into_iter()
                .map(|o| normalize_origin(o.as_ref()))
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.contains(&normalize_origin(origin)) || is_loopback_origin(origin)
    }
}

/// `http(s)://localhost`, `127.0.0.1` or `[::1]` on any port.
pub fn is_loopback_origin(origin: &str) -> bool {
    let Ok(url) = Url::parse(origin.trim()) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url
            .host_str()
            .is_some_and(|host| LOOPBACK_HOSTS.contains(&host))
}

/// Rejects requests whose `Origin` header is present and not allowed. Requests without one pass.
pub async fn enforce_origin(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !policy.is_allowed(origin) {
            return ApiError::OriginNotAllowed(origin.to_string()).into_response();
        }
    }
    next.run(request).await
}

/// CORS response headers for allowed origins.
pub fn cors_layer(policy: Arc<OriginPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request| {
                origin
                    .to_str()
                    .map(|origin| policy.is_allowed(origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_origins_pass_on_any_port() {
        assert!(is_loopback_origin("http://localhost:5173"));
        assert!(is_loopback_origin("http://127.0.0.1:8080"));
        assert!(is_loopback_origin("http://[::1]:3000"));
        assert!(!is_loopback_origin("http://localhost.evil.dev"));
        assert!(!is_loopback_origin("file://localhost/etc"));
        assert!(!is_loopback_origin("null"));
    }

    #[test]
    fn configured_origins_match_after_normalization() {
        let policy = OriginPolicy::new(["https://me.dev/"]);
        assert!(policy.is_allowed("https://me.dev"));
        assert!(!policy.is_allowed("https://evil.dev"));
        assert!(!policy.is_allowed("https://me.dev.evil.dev"));
    }
}
