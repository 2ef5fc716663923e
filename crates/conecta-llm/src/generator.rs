use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use conecta_core::errors::ProviderError;

use crate::gemini::GeminiGenerator;

/// Trait implemented by each text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Send one composed prompt and return the reply text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// The model capability as selected at startup.
///
/// `Unavailable` is not an error: the conversation service degrades to a
/// fixed fallback reply for the process lifetime.
#[derive(Clone)]
pub enum ModelCapability {
    Available(Arc<dyn TextGenerator>),
    Unavailable,
}

impl ModelCapability {
    pub fn available(generator: impl TextGenerator + 'static) -> Self {
        Self::Available(Arc::new(generator))
    }

    /// Select the capability from the environment.
    ///
    /// `GEMINI_API_KEY` wins over the legacy `GOOGLE_API_KEY`; a missing or
    /// empty key disables generation for the process lifetime.
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        match key {
            Some(key) => {
                let model = std::env::var("GEMINI_MODEL").ok();
                Self::available(GeminiGenerator::new(
                    SecretString::from(key),
                    model.as_deref(),
                ))
            }
            None => Self::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn generator(&self) -> Option<&Arc<dyn TextGenerator>> {
        match self {
            Self::Available(g) => Some(g),
            Self::Unavailable => None,
        }
    }
}
