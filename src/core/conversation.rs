use super::LanguageStyle;
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            sources,
            timestamp: Local::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Messages of one chat session, oldest first.
///
/// Owned by the caller and threaded through every turn; nothing about a
/// session lives in global state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
    language_style: Option<LanguageStyle>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Style detected on the most recent user message.
    pub fn language_style(&self) -> Option<LanguageStyle> {
        self.language_style
    }

    pub fn set_language_style(&mut self, style: LanguageStyle) {
        self.language_style = Some(style);
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::new(Role::User, content, Vec::new()))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>, sources: Vec<String>) -> &Message {
        self.push(Message::new(Role::Assistant, content, sources))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.language_style = None;
    }
}
