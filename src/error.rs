use std::path::PathBuf;

/// Recoverable failures inside the answer pipeline.
///
/// Neither kind is fatal: a missing seed file degrades the bot to
/// remote-only mode, and a failed remote call advances the fallback chain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChatError {
    /// Seed file is missing or malformed.
    #[error("seed data unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// Network error, timeout or empty answer from a model.
    #[error("remote call to {model} failed: {reason}")]
    RemoteCallFailed { model: String, reason: String },
}

impl ChatError {
    pub fn remote(model: impl Into<String>, reason: impl Into<String>) -> Self {
        ChatError::RemoteCallFailed {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
