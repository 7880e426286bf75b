use async_trait::async_trait;
use locgenai::ai::{Generation, ModelBackend};
use locgenai::core::{Conversation, LanguageDetector, LanguageStyle, ReplyOrigin, Responder, Role};
use locgenai::error::Result;
use locgenai::services::SeedStore;
use locgenai::{ChatError, Config};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Remote model that is always down.
#[derive(Default)]
struct OfflineBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl ModelBackend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate(&self, model: &str, _prompt: &str) -> Result<Generation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ChatError::RemoteCallFailed {
            model: model.to_string(),
            reason: "network unreachable".to_string(),
        })
    }
}

fn seed_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write seeds");
    file
}

fn responder_with(seeds: &str, backend: Arc<OfflineBackend>) -> Responder {
    let file = seed_file(seeds);
    let store = SeedStore::load(file.path()).expect("seed file loads");
    Responder::from_config(&Config::default(), store, backend)
}

#[tokio::test]
async fn exact_question_returns_the_seed_answer() {
    let backend = Arc::new(OfflineBackend::default());
    let responder = responder_with(
        r#"[{"question": "what is durga puja", "answer": "A major Bengali festival..."}]"#,
        backend.clone(),
    );

    let reply = responder.respond("What is Durga Puja?").await;
    assert_eq!(reply.answer, "A major Bengali festival...");
    assert!(reply.sources.is_empty());
    assert!(matches!(reply.origin, ReplyOrigin::Seed { exact: true, .. }));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fuzzy_variant_returns_the_seed_answer() {
    let backend = Arc::new(OfflineBackend::default());
    let responder = responder_with(
        r#"[{"q": "When is Poila Boishakh?", "a": "On 14 or 15 April."}]"#,
        backend.clone(),
    );

    let reply = responder.respond("poila boishakh kobe?").await;
    assert_eq!(reply.answer, "On 14 or 15 April.");
    assert!(reply.from_seed());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unmatched_question_with_both_models_down_gets_a_fallback() {
    let backend = Arc::new(OfflineBackend::default());
    let responder = responder_with(
        r#"[{"q": "When is Poila Boishakh?", "a": "On 14 or 15 April."}]"#,
        backend.clone(),
    );

    let reply = responder.respond("Which train goes to Darjeeling?").await;
    let fallbacks = Config::default().fallback_messages;

    assert_eq!(reply.origin, ReplyOrigin::StaticFallback);
    assert!(!reply.answer.is_empty());
    assert!(fallbacks.contains(&reply.answer), "unexpected answer: {}", reply.answer);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn mixed_script_text_is_code_mixed() {
    let detector = LanguageDetector::default();
    assert_eq!(detector.detect("আমি ki korbo today"), LanguageStyle::Mixed);
    assert_eq!(detector.detect("ami ki korbo today"), LanguageStyle::Mixed);
}

#[tokio::test]
async fn missing_seed_file_degrades_to_remote_only() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SeedStore::load_or_empty(&dir.path().join("seed_qas.json"));
    assert!(store.is_empty());

    let backend = Arc::new(OfflineBackend::default());
    let responder = Responder::from_config(&Config::default(), store, backend.clone());

    let reply = responder.respond("what is durga puja").await;
    assert_eq!(reply.origin, ReplyOrigin::StaticFallback);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn conversation_is_threaded_through_turns() {
    let backend = Arc::new(OfflineBackend::default());
    let responder = responder_with(
        r#"{"q": "Who wrote Gitanjali?", "a": "Rabindranath Tagore.", "sources": ["https://en.wikipedia.org/wiki/Gitanjali"]}"#,
        backend,
    );

    let conversation = responder
        .process_turn(Conversation::new(), "who wrote gitanjali")
        .await;
    let conversation = responder.process_turn(conversation, "kichu bolo").await;

    let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(conversation.messages()[1].content, "Rabindranath Tagore.");
    assert_eq!(
        conversation.messages()[1].sources,
        vec!["https://en.wikipedia.org/wiki/Gitanjali"]
    );
    assert_eq!(conversation.language_style(), Some(LanguageStyle::Mixed));
}

#[tokio::test]
async fn reply_serializes_as_answer_and_sources() {
    let backend = Arc::new(OfflineBackend::default());
    let responder = responder_with(r#"[{"q": "hello", "a": "Nomoskar!"}]"#, backend);

    let reply = responder.respond("Hello").await;
    let json = serde_json::to_value(&reply).expect("json");
    assert_eq!(json["answer"], "Nomoskar!");
    assert_eq!(json["sources"], serde_json::json!([]));
    assert_eq!(json["origin"]["kind"], "seed");
}
