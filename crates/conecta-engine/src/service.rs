use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use conecta_core::errors::{ChatError, ProviderError};
use conecta_core::ids::SessionKey;
use conecta_core::turns::Stage;
use conecta_llm::ModelCapability;
use conecta_store::SessionStore;

use crate::prompt;

/// Reply returned while the model capability is unavailable.
pub const FALLBACK_REPLY: &str = "Olá! Sou o assistente da ConectaFast! Infelizmente estou com problemas técnicos no momento. Tente novamente em alguns minutos. 😊";

/// Upper bound on a single model call. The upstream API has no deadline of
/// its own.
const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Result of one handled chat message.
#[derive(Clone, Debug)]
pub struct ChatOutcome {
    pub reply: String,
    pub session_key: SessionKey,
    pub stage: Stage,
}

/// Orchestrates a chat turn: session lookup, prompt composition, the model
/// call, and history bookkeeping.
pub struct ConversationService {
    store: Arc<SessionStore>,
    capability: ModelCapability,
    call_timeout: Duration,
}

impl ConversationService {
    pub fn new(store: Arc<SessionStore>, capability: ModelCapability) -> Self {
        Self {
            store,
            capability,
            call_timeout: CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Handle one inbound customer message.
    ///
    /// The session entry lock is held across the model call, so concurrent
    /// requests for the same key serialize and exactly one of them composes
    /// the greeting prompt. Failures leave the session exactly as found.
    #[instrument(skip(self, message), fields(session_key = %key))]
    pub async fn handle(&self, key: SessionKey, message: &str) -> Result<ChatOutcome, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let entry = self.store.get_or_create(&key);
        let mut session = entry.lock().await;

        tracing::info!(session_key = %key, "user: {message}");

        let Some(generator) = self.capability.generator() else {
            return Ok(ChatOutcome {
                reply: FALLBACK_REPLY.to_string(),
                stage: session.stage,
                session_key: key,
            });
        };

        let prompt = prompt::compose(&session, prompt::SALES_SCRIPT, message);

        let reply = match tokio::time::timeout(self.call_timeout, generator.generate(&prompt)).await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                tracing::error!(session_key = %key, kind = e.error_kind(), "model call failed: {e}");
                return Err(e.into());
            }
            Err(_) => {
                let e = ProviderError::Timeout(self.call_timeout);
                tracing::error!(session_key = %key, kind = e.error_kind(), "model call failed: {e}");
                return Err(e.into());
            }
        };

        session.mark_greeted();
        session.record_exchange(message, &reply);

        tracing::info!(session_key = %key, "bot: {}...", reply_preview(&reply));

        Ok(ChatOutcome {
            reply,
            stage: session.stage,
            session_key: key,
        })
    }

    /// Drop the session for `key`. Always succeeds; the next message starts
    /// a fresh conversation.
    pub fn clear(&self, key: &SessionKey) {
        self.store.remove(key);
    }
}

/// First 100 characters of a reply, for log lines.
fn reply_preview(reply: &str) -> String {
    reply.chars().take(100).collect()
}
