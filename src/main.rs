use std::sync::Arc;

use conecta_engine::ConversationService;
use conecta_llm::{ModelCapability, TextGenerator};
use conecta_server::ServerConfig;
use conecta_store::SessionStore;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting ConectaFast sales assistant");

    // Model capability is fixed for the process lifetime.
    let capability = ModelCapability::from_env();
    match &capability {
        ModelCapability::Available(generator) => {
            tracing::info!(model = generator.model(), "model capability available");
        }
        ModelCapability::Unavailable => {
            tracing::warn!(
                "no API key configured (GEMINI_API_KEY / GOOGLE_API_KEY); chat will answer with the fallback reply"
            );
        }
    }

    let store = Arc::new(SessionStore::new());
    let service = Arc::new(ConversationService::new(store, capability));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(|| ServerConfig::default().port);

    let handle = conecta_server::start(ServerConfig { port }, service)
        .await
        .expect("Failed to start server");

    tracing::info!(port = handle.port, "ConectaFast sales assistant ready");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}
