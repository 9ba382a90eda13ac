use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ClientWindow {
    pub burst_count: u32,
    pub burst_started: DateTime<Utc>,
    pub minute_count: u32,
    pub minute_started: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub retry_at: DateTime<Utc>,
}

pub struct RateLimiter {
    windows: DashMap<String, ClientWindow>,
    requests_per_minute: u32,
    burst_size: u32,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32, burst_size: u32) -> Self {
        Self {
            windows: DashMap::new(),
            requests_per_minute: requests_per_minute.max(1),
            burst_size: burst_size.max(1),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.requests_per_minute, config.burst_size)
    }

    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Utc::now())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Consumes one request for `client` at `now` when both windows allow it.
    pub fn check_at(&self, client: &str, now: DateTime<Utc>) -> RateDecision {
        self.evict_expired(now);
        let mut window = self
            .windows
            .entry(client.to_string())
            .or_insert_with(|| ClientWindow {
                burst_count: 0,
                burst_started: now,
                minute_count: 0,
                minute_started: now,
            });

        if now.signed_duration_since(window.burst_started) >= Duration::seconds(1) {
            window.burst_count = 0;
            window.burst_started = now;
        }
        if now.signed_duration_since(window.minute_started) >= Duration::minutes(1) {
            window.minute_count = 0;
            window.minute_started = now;
        }

        let burst_ok = window.burst_count < self.burst_size;
        let minute_ok = window.minute_count < self.requests_per_minute;
        if burst_ok && minute_ok {
            window.burst_count += 1;
            window.minute_count += 1;
            RateDecision {
                allowed: true,
                remaining: (self.burst_size - window.burst_count)
                    .min(self.requests_per_minute - window.minute_count),
                retry_at: now,
            }
        } else {
            let retry_at = if burst_ok {
                window.minute_started + Duration::minutes(1)
            } else {
                window.burst_started + Duration::seconds(1)
            };
            RateDecision {
                allowed: false,
                remaining: 0,
                retry_at,
            }
        }
    }

    // Must run before taking an entry guard: retain locks every shard.
    fn evict_expired(&self, now: DateTime<Utc>) {
        self.windows.retain(|_, window| {
            now.signed_duration_since(window.minute_started) < Duration::minutes(1)
        });
    }
}
