pub mod gemini;
pub mod local;
pub mod similarity;

pub use gemini::GeminiClient;
pub use local::{MatchResult, SeedMatcher};

use crate::error::Result;
use async_trait::async_trait;

/// Text produced by a remote model, with any source links it carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    pub text: String,
    pub sources: Vec<String>,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// A hosted text-completion service: send a prompt, get text or an error.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    fn name(&self) -> &str;

    /// One attempt against `model`. Failures come back as
    /// [`crate::error::ChatError::RemoteCallFailed`].
    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation>;
}
