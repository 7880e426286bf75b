use super::sources;
use super::{Conversation, LanguageDetector, LanguageStyle};
use crate::ai::{Generation, ModelBackend, SeedMatcher};
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::services::SeedStore;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const EMPTY_INPUT_REPLY: &str = "Please enter a question.";

/// Used only when the configured fallback list is empty.
const LAST_RESORT_REPLY: &str = "Sorry, I couldn't generate an answer right now. Please try again.";

/// Which step of the chain produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyOrigin {
    EmptyInput,
    Seed { exact: bool, score: f64 },
    PrimaryModel,
    BackupModel,
    StaticFallback,
}

/// What a front end gets back for one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub answer: String,
    pub sources: Vec<String>,
    pub origin: ReplyOrigin,
}

impl Reply {
    pub fn from_seed(&self) -> bool {
        matches!(self.origin, ReplyOrigin::Seed { .. })
    }

    fn without_sources(answer: impl Into<String>, origin: ReplyOrigin) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
            origin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelTier {
    Primary,
    Backup,
}

impl ModelTier {
    fn origin(self) -> ReplyOrigin {
        match self {
            ModelTier::Primary => ReplyOrigin::PrimaryModel,
            ModelTier::Backup => ReplyOrigin::BackupModel,
        }
    }
}

/// Answers questions: seed list first, then the primary model, the backup
/// model, and finally a canned apology. Never fails.
pub struct Responder {
    seeds: SeedStore,
    matcher: SeedMatcher,
    detector: LanguageDetector,
    backend: Arc<dyn ModelBackend>,
    primary_model: String,
    backup_model: String,
    instruction: String,
    call_timeout: Duration,
    fallback_messages: Vec<String>,
}

impl Responder {
    pub fn new(seeds: SeedStore, backend: Arc<dyn ModelBackend>) -> Self {
        Self::from_config(&Config::default(), seeds, backend)
    }

    pub fn from_config(config: &Config, seeds: SeedStore, backend: Arc<dyn ModelBackend>) -> Self {
        log::info!(
            "🤖 Responder ready: {} seeds, {} → {} via {}",
            seeds.len(),
            config.primary_model,
            config.backup_model,
            backend.name()
        );

        Self {
            seeds,
            matcher: SeedMatcher::new(config.fuzzy_threshold),
            detector: LanguageDetector::default(),
            backend,
            primary_model: config.primary_model.clone(),
            backup_model: config.backup_model.clone(),
            instruction: config.instruction.clone(),
            call_timeout: config.request_timeout,
            fallback_messages: clean_messages(&config.fallback_messages),
        }
    }

    pub fn with_matcher(mut self, matcher: SeedMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_models(mut self, primary: impl Into<String>, backup: impl Into<String>) -> Self {
        self.primary_model = primary.into();
        self.backup_model = backup.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_fallback_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        self.fallback_messages = clean_messages(&messages);
        self
    }

    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    pub fn fallback_messages(&self) -> &[String] {
        &self.fallback_messages
    }

    /// Resolves one question to an answer.
    pub async fn respond(&self, input: &str) -> Reply {
        let query = input.trim();
        if query.is_empty() {
            return Reply::without_sources(EMPTY_INPUT_REPLY, ReplyOrigin::EmptyInput);
        }

        let style = self.detector.detect(query);
        self.respond_in_style(query, style).await
    }

    /// Same as [`Responder::respond`] for raw bytes; invalid UTF-8 is replaced.
    pub async fn respond_bytes(&self, input: &[u8]) -> Reply {
        self.respond(&String::from_utf8_lossy(input)).await
    }

    /// Runs one chat turn: appends the user message and the reply to
    /// `conversation` and hands it back. Blank input leaves it untouched.
    pub async fn process_turn(&self, mut conversation: Conversation, input: &str) -> Conversation {
        let text = input.trim();
        if text.is_empty() {
            return conversation;
        }

        let style = self.detector.detect(text);
        conversation.set_language_style(style);
        conversation.push_user(text);

        let reply = self.respond_in_style(text, style).await;
        conversation.push_assistant(reply.answer, reply.sources);
        conversation
    }

    async fn respond_in_style(&self, query: &str, style: LanguageStyle) -> Reply {
        if let Some(reply) = self.seed_reply(query, style) {
            return reply;
        }

        let prompt = self.build_prompt(query, style);
        for tier in [ModelTier::Primary, ModelTier::Backup] {
            match self.ask(tier, &prompt).await {
                Ok(generation) => {
                    log::info!("✓ Answered by {}", self.model_for(tier));
                    return Self::model_reply(generation, tier);
                }
                Err(e) => log::warn!("⚠️ {e}"),
            }
        }

        log::warn!("All answer sources exhausted, using static fallback");
        Reply::without_sources(self.pick_fallback(), ReplyOrigin::StaticFallback)
    }

    fn seed_reply(&self, query: &str, style: LanguageStyle) -> Option<Reply> {
        let found = self.matcher.find_match(query, self.seeds.records())?;
        log::info!(
            "📚 Seed answer ({}, score {:.1}): {}",
            if found.matched_exactly { "exact" } else { "fuzzy" },
            found.score,
            found.record.question
        );

        Some(Reply {
            answer: found.record.localized_answer(style).to_string(),
            sources: found.record.sources.clone(),
            origin: ReplyOrigin::Seed {
                exact: found.matched_exactly,
                score: found.score,
            },
        })
    }

    /// Instruction, optional language hint, then the user's text.
    pub fn build_prompt(&self, query: &str, style: LanguageStyle) -> String {
        let mut prompt = String::new();

        let instruction = self.instruction.trim();
        if !instruction.is_empty() {
            prompt.push_str(instruction);
            prompt.push_str("\n\n");
        }
        if let Some(hint) = style.prompt_hint() {
            prompt.push_str(hint);
            prompt.push_str("\n\n");
        }

        prompt.push_str("User: ");
        prompt.push_str(query);
        prompt.push_str("\nAssistant:");
        prompt
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Primary => &self.primary_model,
            ModelTier::Backup => &self.backup_model,
        }
    }

    /// One bounded attempt; a timeout or blank text counts as a failure.
    async fn ask(&self, tier: ModelTier, prompt: &str) -> Result<Generation> {
        let model = self.model_for(tier);

        let generation =
            match tokio::time::timeout(self.call_timeout, self.backend.generate(model, prompt)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(ChatError::remote(
                        model,
                        format!("timed out after {:?}", self.call_timeout),
                    ))
                }
            };

        if generation.text.trim().is_empty() {
            return Err(ChatError::remote(model, "empty response"));
        }
        Ok(generation)
    }

    fn model_reply(generation: Generation, tier: ModelTier) -> Reply {
        let answer = generation.text.trim().to_string();

        let mut found = Vec::new();
        sources::merge_sources(&mut found, &generation.sources);
        sources::merge_sources(&mut found, sources::extract_urls(&answer));

        Reply {
            answer,
            sources: found,
            origin: tier.origin(),
        }
    }

    fn pick_fallback(&self) -> String {
        if self.fallback_messages.is_empty() {
            return LAST_RESORT_REPLY.to_string();
        }
        let idx = rand::rng().random_range(0..self.fallback_messages.len());
        self.fallback_messages[idx].clone()
    }
}

fn clean_messages(messages: &[String]) -> Vec<String> {
    messages
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
