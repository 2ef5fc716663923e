use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use conecta_engine::ConversationService;

use crate::handlers;

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConversationService>,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/plans", get(handlers::plans))
        .route("/clear", post(handlers::clear))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Create and start the server. Returns a handle that keeps it alive.
pub async fn start(
    config: ServerConfig,
    service: Arc<ConversationService>,
) -> Result<ServerHandle, std::io::Error> {
    let router = build_router(AppState { service });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "ConectaFast server started");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server_handle,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use conecta_core::errors::ProviderError;
    use conecta_engine::FALLBACK_REPLY;
    use conecta_llm::mock::{MockGenerator, MockReply};
    use conecta_llm::ModelCapability;
    use conecta_store::SessionStore;
    use serde_json::json;

    fn service_with(replies: Vec<MockReply>) -> (Arc<ConversationService>, Arc<MockGenerator>) {
        let mock = Arc::new(MockGenerator::new(replies));
        let capability = ModelCapability::Available(mock.clone());
        let service = Arc::new(ConversationService::new(
            Arc::new(SessionStore::new()),
            capability,
        ));
        (service, mock)
    }

    async fn spawn_server(service: Arc<ConversationService>) -> ServerHandle {
        start(ServerConfig { port: 0 }, service).await.unwrap()
    }

    #[tokio::test]
    async fn server_starts_and_serves_health() {
        let (service, _) = service_with(vec![]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let url = format!("http://127.0.0.1:{port}/health");
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn chat_roundtrip_with_default_session() {
        let (service, _) = service_with(vec![MockReply::text("Olá! Bem-vindo à ConectaFast 😊")]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/chat"))
            .json(&json!({ "message": "oi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["reply"], "Olá! Bem-vindo à ConectaFast 😊");
        assert_eq!(body["sessionId"], "default");
        assert_eq!(body["stage"], "greeting");
    }

    #[tokio::test]
    async fn chat_keeps_sessions_separate() {
        let (service, mock) = service_with(vec![
            MockReply::text("resposta a"),
            MockReply::text("resposta b"),
        ]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        for session in ["alice", "bob"] {
            let resp = client
                .post(format!("http://127.0.0.1:{port}/chat"))
                .json(&json!({ "message": "oi", "sessionId": session }))
                .send()
                .await
                .unwrap();
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["sessionId"], session);
        }

        // Separate sessions: both calls were first messages.
        let prompts = mock.prompts();
        assert!(prompts[0].contains("O cliente acabou de chegar"));
        assert!(prompts[1].contains("O cliente acabou de chegar"));
    }

    #[tokio::test]
    async fn blank_message_returns_400() {
        let (service, mock) = service_with(vec![]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        for body in [json!({ "message": "   " }), json!({})] {
            let resp = client
                .post(format!("http://127.0.0.1:{port}/chat"))
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 400);

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["error"], crate::handlers::EMPTY_MESSAGE_ERROR);
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_returns_500_with_fixed_body() {
        let (service, _) = service_with(vec![MockReply::Error(ProviderError::ServerError {
            status: 503,
            body: "upstream down".into(),
        })]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/chat"))
            .json(&json!({ "message": "oi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], crate::handlers::GENERATION_ERROR);
    }

    #[tokio::test]
    async fn unavailable_capability_degrades_to_fallback() {
        let service = Arc::new(ConversationService::new(
            Arc::new(SessionStore::new()),
            ModelCapability::Unavailable,
        ));
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/chat"))
            .json(&json!({ "message": "oi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["reply"], FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn plans_lists_the_full_catalog() {
        let (service, _) = service_with(vec![]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let url = format!("http://127.0.0.1:{port}/plans");
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        let plans = body["plans"].as_object().unwrap();
        assert_eq!(plans.len(), 4);
        for id in ["basic", "standard", "premium", "ultra"] {
            let plan = &plans[id];
            assert!(plan["name"].as_str().is_some_and(|s| !s.is_empty()));
            assert!(plan["speed"].as_str().is_some_and(|s| !s.is_empty()));
            assert!(plan["price"].as_str().is_some_and(|s| !s.is_empty()));
            assert!(!plan["features"].as_array().unwrap().is_empty());
        }
        assert_eq!(plans["basic"]["name"], "Plano Básico");
    }

    #[tokio::test]
    async fn clear_confirms_and_resets_the_session() {
        let (service, mock) = service_with(vec![
            MockReply::text("olá!"),
            MockReply::text("olá de novo!"),
        ]);
        let handle = spawn_server(service).await;
        let port = handle.port;

        let client = reqwest::Client::new();
        let chat_url = format!("http://127.0.0.1:{port}/chat");

        client
            .post(&chat_url)
            .json(&json!({ "message": "oi" }))
            .send()
            .await
            .unwrap();

        let resp = client
            .post(format!("http://127.0.0.1:{port}/clear"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["message"], crate::handlers::CLEARED_MESSAGE);

        client
            .post(&chat_url)
            .json(&json!({ "message": "voltei" }))
            .send()
            .await
            .unwrap();

        let prompts = mock.prompts();
        assert!(prompts[1].contains("O cliente acabou de chegar"));
    }

    #[test]
    fn build_router_creates_routes() {
        let (service, _) = service_with(vec![]);
        let _router = build_router(AppState { service });
        // If this doesn't panic, the router was built successfully
    }
}
