//! freight-server
//!
//! Axum server exposing the freight quoting tools over HTTP, plus the
//! keyword router that picks a specialist for a free-text request.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::ToolRegistry;
use freight_advisor::{register_all, AdvisorConfig, MemoryQuoteStore, QuoteStore};

use crate::handlers::{execute_tool, health_check, list_tools, route_message};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AdvisorConfig::from_env()?;
    let data = config.load_reference_data()?;
    tracing::info!(
        customs_policy = ?config.customs_policy,
        data_dir = ?config.data_dir,
        history_limit = config.history_limit,
        "✓ Reference data loaded"
    );

    // One store shared by the quote tools and the health endpoint
    let store: Arc<dyn QuoteStore> = Arc::new(MemoryQuoteStore::new());

    let mut tools = ToolRegistry::new();
    register_all(&mut tools, data, store.clone(), &config);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let state = AppState {
        tools: Arc::new(tools),
        store,
        config: Arc::new(config),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(execute_tool))
        .route("/api/route", post(route_message))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚢 freight-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health           - Health check");
    tracing::info!("  GET  /api/tools        - List tool schemas");
    tracing::info!("  POST /api/tools/{{name}} - Run a tool");
    tracing::info!("  POST /api/route        - Route a request to a specialist");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
