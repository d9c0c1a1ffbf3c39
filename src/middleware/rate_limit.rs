use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::{debug, warn};

use crate::api::errors::ApiError;
use crate::config::Config;

/// Expired windows are swept once every this many admitted requests.
const SWEEP_INTERVAL: u64 = 1024;

/// Fixed-window request counter per client IP.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    requests: Arc<AtomicU64>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            requests: Arc::new(AtomicU64::new(0)),
            max_requests,
            window_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.rate_limit_max_requests(),
            config.rate_limit_window_secs(),
        )
    }

    /// Count one request from `ip` at `now`; `false` once the window is used up.
    fn admit(&self, ip: String, now: DateTime<Utc>) -> bool {
        // Sweep before taking the entry lock below.
        if self.requests.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.evict_expired(now);
        }

        let mut entry = self.store.entry(ip).or_insert_with(|| RateLimitData {
            count: 0,
            window_start: now,
        });

        let data = entry.value_mut();

        // Check if we need to reset the window
        if now.signed_duration_since(data.window_start) >= Duration::seconds(self.window_seconds) {
            data.count = 0;
            data.window_start = now;
        }

        data.count += 1;
        data.count <= self.max_requests
    }

    /// Drop the counters of clients whose window has run out.
    fn evict_expired(&self, now: DateTime<Utc>) {
        let window = Duration::seconds(self.window_seconds);
        let before = self.store.len();
        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
        debug!(evicted = before.saturating_sub(self.store.len()), "swept rate limit windows");
    }
}

/// IP-based rate limiting middleware.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();

    if !rate_limit.admit(ip, Utc::now()) {
        warn!(client = %addr.ip(), "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(req).await
}
