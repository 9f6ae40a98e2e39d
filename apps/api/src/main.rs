mod config;
mod dashboard;
mod errors;
mod form;
mod grading;
mod llm_client;
mod models;
mod render;
mod routes;
mod shell;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::grading::grader::GeminiEssayGrader;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ProfAI v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and grader
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
    )?;
    let grader = Arc::new(GeminiEssayGrader::new(llm));
    info!("Grader initialized (model: {})", llm_client::MODEL);

    info!(
        "Essay thresholds: >{} chars to submit, {} words to enable submit, warning under {} words",
        config.thresholds.min_essay_chars,
        config.thresholds.min_submit_words,
        config.thresholds.short_warning_words
    );

    let state = AppState::new(grader, config.clone());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
