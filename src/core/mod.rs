pub mod agent;
pub mod conversation;
pub mod language;
pub mod sources;

pub use agent::{Reply, ReplyOrigin, Responder};
pub use conversation::{Conversation, Message, Role};
pub use language::{LanguageDetector, LanguageStyle};
