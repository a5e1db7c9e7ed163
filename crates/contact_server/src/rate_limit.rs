//! Fixed-window rate limiting keyed by client address.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{error::ApiError, http_server::AppState};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_CLIENT: &str = "unknown";
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    started_at: Instant,
    count: u32,
}

/// Outcome of one limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

/// Per-client fixed-window counter table.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: DashMap<String, WindowCounter>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: DashMap::new(),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Counts one request for `client`.
    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        let mut counter = self
            .counters
            .entry(client.to_string())
            .or_insert(WindowCounter {
                started_at: now,
                count: 0,
            });

        let elapsed = now.saturating_duration_since(counter.started_at);
        if elapsed >= self.window {
            counter.started_at = now;
            counter.count = 0;
        }

        if counter.count >= self.max_requests {
            let elapsed = now.saturating_duration_since(counter.started_at);
            return RateDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        counter.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - counter.count,
        }
    }

    /// Drops counters whose window has ended. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let before = self.counters.len();
        self.counters
            .retain(|_, counter| now.saturating_duration_since(counter.started_at) < self.window);
        before.saturating_sub(self.counters.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.counters.len()
    }

    /// Starts the background task that sweeps stale counters once per window.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        let period = limiter.window.max(MIN_SWEEP_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = limiter.sweep();
                if removed > 0 {
                    debug!(
                        removed,
                        remaining = limiter.tracked_clients(),
                        "swept rate-limit counters"
                    );
                }
            }
        })
    }
}

/// Identifies the client: first `X-Forwarded-For` hop when the proxy is trusted, else the peer IP.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(client) = forwarded {
            return client.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware for the contact route.
pub async fn enforce(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(
        request.headers(),
        connect_info.map(|ConnectInfo(addr)| addr),
        state.config.trust_proxy,
    );

    match state.limiter.check(&client) {
        RateDecision::Limited { retry_after } => {
            debug!(%client, "rate limit exceeded");
            ApiError::RateLimited {
                retry_after_secs: retry_after.as_secs(),
            }
            .into_response()
        }
        RateDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(
                HeaderName::from_static("ratelimit-limit"),
                HeaderValue::from(state.limiter.max_requests()),
            );
            headers.insert(
                HeaderName::from_static("ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            response
        }
    }
}
