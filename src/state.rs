//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional model client, the live solution views and the
//! solve rate limiter. Views are memory-only: idle ones are evicted and the
//! rest die with the process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::llm::SolutionModel;
use crate::rate_limit::RateLimiter;
use crate::services::view::SolutionView;

/// How long an untouched view is kept before eviction.
pub const DEFAULT_VIEW_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional model client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn SolutionModel>>,
    /// Displayed solutions keyed by view id.
    pub views: Arc<RwLock<HashMap<Uuid, SolutionView>>>,
    pub rate_limiter: RateLimiter,
    pub view_idle_ttl: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn SolutionModel>>, rate_limiter: RateLimiter) -> Self {
        Self { llm, views: Arc::new(RwLock::new(HashMap::new())), rate_limiter, view_idle_ttl: DEFAULT_VIEW_IDLE_TTL }
    }

    #[must_use]
    pub fn with_view_idle_ttl(mut self, ttl: Duration) -> Self {
        self.view_idle_ttl = ttl;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
