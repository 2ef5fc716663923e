//! HTTP handlers and wire DTOs for the chat surface.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use conecta_core::catalog;
use conecta_core::errors::ChatError;
use conecta_core::ids::SessionKey;
use conecta_core::turns::Stage;

use crate::server::AppState;

pub const EMPTY_MESSAGE_ERROR: &str = "Mensagem é obrigatória";
pub const GENERATION_ERROR: &str = "Ops! Tive um problema técnico. Pode tentar novamente?";
pub const CLEARED_MESSAGE: &str = "Conversa limpa. Vou me apresentar novamente!";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Missing and blank messages are both rejected with 400.
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: SessionKey,
    pub stage: Stage,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    pub session_id: Option<String>,
}

fn session_key(raw: Option<String>) -> SessionKey {
    raw.map(SessionKey::from_raw).unwrap_or_default()
}

/// `POST /chat`
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let key = session_key(req.session_id);

    match state.service.handle(key, &req.message).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ChatResponse {
                reply: outcome.reply,
                session_id: outcome.session_key,
                stage: outcome.stage,
            }),
        )
            .into_response(),
        Err(ChatError::EmptyMessage) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": EMPTY_MESSAGE_ERROR })),
        )
            .into_response(),
        // Detail already logged by the service; clients get the fixed text.
        Err(ChatError::Generation(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERATION_ERROR })),
        )
            .into_response(),
    }
}

/// `GET /plans`
pub async fn plans() -> Json<serde_json::Value> {
    let mut by_id = serde_json::Map::new();
    for plan in catalog::all_plans() {
        by_id.insert(
            plan.id.to_string(),
            serde_json::to_value(plan).unwrap_or_default(),
        );
    }
    Json(json!({ "plans": by_id }))
}

/// `POST /clear`
pub async fn clear(State(state): State<AppState>, Json(req): Json<ClearRequest>) -> Json<serde_json::Value> {
    let key = session_key(req.session_id);
    state.service.clear(&key);
    Json(json!({ "message": CLEARED_MESSAGE }))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_defaults_when_absent() {
        assert_eq!(session_key(None).as_str(), "default");
        assert_eq!(session_key(Some("visitor-1".into())).as_str(), "visitor-1");
    }

    #[test]
    fn chat_request_tolerates_missing_fields() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.message, "");
        assert!(req.session_id.is_none());

        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"oi","sessionId":"abc"}"#).unwrap();
        assert_eq!(req.message, "oi");
        assert_eq!(req.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn chat_response_uses_camel_case() {
        let resp = ChatResponse {
            reply: "olá".into(),
            session_id: SessionKey::from_raw("abc"),
            stage: Stage::Greeting,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["stage"], "greeting");
        assert_eq!(json["reply"], "olá");
    }
}
