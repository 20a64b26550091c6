mod config;
mod emotion;
mod errors;
mod interview;
mod llm_client;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::emotion::classifier::{EmotionModel, OnnxEmotionModel};
use crate::interview::scorer::LlmTranscriptScorer;
use crate::llm_client::LlmClient;
use crate::report::resume::PlaceholderResumeSummarizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartHire API v{}", env!("CARGO_PKG_VERSION"));

    // Load the emotion model once, before any request can reach it
    let model_path = config.emotion_model_path.clone();
    let emotion_model: Arc<dyn EmotionModel> =
        Arc::new(tokio::task::spawn_blocking(move || OnnxEmotionModel::load(&model_path)).await??);
    info!(
        "Emotion model loaded from {}",
        config.emotion_model_path.display()
    );

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.llm_base_url,
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        emotion_model,
        transcript_scorer: Arc::new(LlmTranscriptScorer(llm)),
        resume_summarizer: Arc::new(PlaceholderResumeSummarizer),
    };

    // Build router
    let app = build_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router is gone; this is the last handle to the model.
    drop(state);
    info!("Server stopped, emotion model released");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
