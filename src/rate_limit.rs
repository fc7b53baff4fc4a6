//! In-memory rate limiting for solve requests.
//!
//! DESIGN
//! ======
//! Each limit is a sliding window of admission timestamps. A solve must
//! fit in both the window of its view (default 10/min) and the global one
//! (default 30/min) before the model is called. Per-view windows that have
//! emptied out are dropped on the next check, so the map stays bounded by
//! recently active views.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

const DEFAULT_PER_VIEW_LIMIT: usize = 10;
const DEFAULT_PER_VIEW_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 30;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_view_limit: usize,
    pub per_view_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_view_limit: DEFAULT_PER_VIEW_LIMIT,
            per_view_window: Duration::from_secs(DEFAULT_PER_VIEW_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
        }
    }
}

impl RateLimitConfig {
    /// Read overrides from `RATE_LIMIT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let per_view_window_secs = env_parse("RATE_LIMIT_PER_VIEW_WINDOW_SECS", DEFAULT_PER_VIEW_WINDOW_SECS);
        let global_window_secs = env_parse("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_view_limit: env_parse("RATE_LIMIT_PER_VIEW", DEFAULT_PER_VIEW_LIMIT),
            per_view_window: Duration::from_secs(per_view_window_secs),
            global_limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("too many solves for this view (max {limit} per {window_secs}s)")]
    PerViewExceeded { limit: usize, window_secs: u64 },
    #[error("server is busy solving (max {limit} solves per {window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// SLIDING WINDOW
// =============================================================================

/// Timestamps of admitted requests inside one window.
#[derive(Debug, Default)]
struct Window {
    hits: VecDeque<Instant>,
}

impl Window {
    /// Drop hits older than `span` and report how many remain.
    fn live(&mut self, now: Instant, span: Duration) -> usize {
        while self
            .hits
            .front()
            .is_some_and(|&hit| now.duration_since(hit) > span)
        {
            self.hits.pop_front();
        }
        self.hits.len()
    }

    fn record(&mut self, now: Instant) {
        self.hits.push_back(now);
    }
}

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Shared limiter; clones see the same counters.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<Windows>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct Windows {
    per_view: HashMap<Uuid, Window>,
    global: Window,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { windows: Arc::new(Mutex::new(Windows::default())), config }
    }

    /// Admit one solve for `view_id`, or say which limit it would break.
    /// Rejected attempts consume no quota.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] when either window is full.
    pub fn check_and_record(&self, view_id: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(view_id, Instant::now())
    }

    fn check_and_record_at(&self, view_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let cfg = self.config;
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        // Views nobody has used for a full window carry no state worth keeping.
        windows
            .per_view
            .retain(|id, w| *id == view_id || w.live(now, cfg.per_view_window) > 0);

        if windows.global.live(now, cfg.global_window) >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let view = windows.per_view.entry(view_id).or_default();
        if view.live(now, cfg.per_view_window) >= cfg.per_view_limit {
            return Err(RateLimitError::PerViewExceeded {
                limit: cfg.per_view_limit,
                window_secs: cfg.per_view_window.as_secs(),
            });
        }
        view.record(now);
        windows.global.record(now);

        Ok(())
    }

    /// Number of views with live per-view history.
    #[must_use]
    pub fn tracked_views(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .per_view
            .len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
