use std::sync::Arc;
use std::time::Duration;

use egenius::llm::{GeminiClient, SolutionModel};
use egenius::rate_limit::{RateLimitConfig, RateLimiter};
use egenius::{routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Missing model config is not fatal; solve requests answer 503.
    let llm: Option<Arc<dyn SolutionModel>> = match GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "llm client ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "llm not configured, solving disabled");
            None
        }
    };

    let view_idle_ttl = std::env::var("VIEW_IDLE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(state::DEFAULT_VIEW_IDLE_TTL, Duration::from_secs);

    let state = state::AppState::new(llm, RateLimiter::new(RateLimitConfig::from_env())).with_view_idle_ttl(view_idle_ttl);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "egenius listening");
    axum::serve(listener, app).await.expect("server failed");
}
