use crate::core::LanguageStyle;
use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One curated question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedRecord {
    pub question: String,
    pub answer: String,
    pub answer_alt: Option<String>,
    pub sources: Vec<String>,
}

impl SeedRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            answer_alt: None,
            sources: Vec::new(),
        }
    }

    pub fn with_alt(mut self, answer_alt: impl Into<String>) -> Self {
        self.answer_alt = Some(answer_alt.into());
        self
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Native-script questions get the alternate-language answer when the
    /// record has one.
    pub fn localized_answer(&self, style: LanguageStyle) -> &str {
        match (&self.answer_alt, style) {
            (Some(alt), LanguageStyle::Native) => alt,
            _ => &self.answer,
        }
    }
}

/// On-disk shape. Both the long and the short field names are accepted.
#[derive(Debug, Deserialize)]
struct RawSeedRecord {
    #[serde(alias = "q")]
    question: String,
    #[serde(alias = "a")]
    answer: String,
    #[serde(default, alias = "answer_bn")]
    answer_alt: Option<String>,
    #[serde(default)]
    source: Option<OneOrMany>,
    #[serde(default)]
    sources: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

impl From<RawSeedRecord> for SeedRecord {
    fn from(raw: RawSeedRecord) -> Self {
        let mut sources: Vec<String> = Vec::new();
        for src in raw
            .source
            .into_iter()
            .chain(raw.sources)
            .flat_map(OneOrMany::into_vec)
        {
            let src = src.trim();
            if !src.is_empty() && !sources.iter().any(|s| s == src) {
                sources.push(src.to_string());
            }
        }

        Self {
            question: raw.question.trim().to_string(),
            answer: raw.answer.trim().to_string(),
            answer_alt: raw
                .answer_alt
                .map(|alt| alt.trim().to_string())
                .filter(|alt| !alt.is_empty()),
            sources,
        }
    }
}

/// Read-only list of seed records, in file order.
#[derive(Debug, Clone, Default)]
pub struct SeedStore {
    path: Option<PathBuf>,
    records: Vec<SeedRecord>,
}

impl SeedStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SeedRecord>) -> Self {
        Self {
            path: None,
            records,
        }
    }

    /// Loads a JSON array of records, or a stream of JSON objects (one per
    /// line).
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| ChatError::DataUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let records = parse_records(&text).map_err(|e| unavailable(e.to_string()))?;

        log::info!("✅ Loaded {} seed QAs from {}", records.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            records,
        })
    }

    /// Like [`SeedStore::load`], but a missing or broken file yields an
    /// empty store so answers come from the remote model only.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("⚠️ {e}; continuing in remote-only mode");
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_records(text: &str) -> serde_json::Result<Vec<SeedRecord>> {
    if text.trim_start().starts_with('[') {
        let raw: Vec<RawSeedRecord> = serde_json::from_str(text)?;
        return Ok(raw.into_iter().map(SeedRecord::from).collect());
    }

    serde_json::Deserializer::from_str(text)
        .into_iter::<RawSeedRecord>()
        .map(|raw| raw.map(SeedRecord::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write seed file");
        file
    }

    #[test]
    fn loads_array_with_short_field_names() {
        let file = write_temp(
            r#"[
                {"q": "What is Durga Puja?", "a": "A festival.", "answer_bn": "একটি উৎসব।"},
                {"question": "Who wrote Gitanjali?", "answer": "Tagore.", "source": "https://example.org/gitanjali"}
            ]"#,
        );

        let store = SeedStore::load(file.path()).expect("load");
        assert_eq!(store.len(), 2);
        assert_eq!(store.path(), Some(file.path()));

        let first = &store.records()[0];
        assert_eq!(first.question, "What is Durga Puja?");
        assert_eq!(first.answer_alt.as_deref(), Some("একটি উৎসব।"));
        assert!(first.sources.is_empty());

        let second = &store.records()[1];
        assert_eq!(second.sources, vec!["https://example.org/gitanjali"]);
    }

    #[test]
    fn loads_json_lines_in_order() {
        let file = write_temp(
            "{\"q\": \"one\", \"a\": \"1\"}\n{\"q\": \"two\", \"a\": \"2\"}\n\n{\"q\": \"three\", \"a\": \"3\"}\n",
        );

        let store = SeedStore::load(file.path()).expect("load");
        let questions: Vec<&str> = store.records().iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["one", "two", "three"]);
    }

    #[test]
    fn merges_source_and_sources_without_duplicates() {
        let file = write_temp(
            r#"[{"q": "x", "a": "y", "source": "https://a.example", "sources": ["https://a.example", "https://b.example", " "]}]"#,
        );

        let store = SeedStore::load(file.path()).expect("load");
        assert_eq!(
            store.records()[0].sources,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.json");

        let err = SeedStore::load(&path).unwrap_err();
        assert!(matches!(err, ChatError::DataUnavailable { ref path, .. } if path.ends_with("nope.json")));
    }

    #[test]
    fn malformed_file_is_data_unavailable() {
        let file = write_temp(r#"[{"q": "missing answer"}]"#);
        let err = SeedStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ChatError::DataUnavailable { .. }));

        let file = write_temp("not json at all");
        assert!(SeedStore::load(file.path()).is_err());
    }

    #[test]
    fn load_or_empty_degrades_to_empty_store() {
        let file = write_temp("{ broken");
        let store = SeedStore::load_or_empty(file.path());
        assert!(store.is_empty());
        assert!(store.path().is_none());
    }

    #[test]
    fn localized_answer_prefers_alt_for_native_text() {
        let record = SeedRecord::new("q", "english answer").with_alt("বাংলা উত্তর");
        assert_eq!(record.localized_answer(LanguageStyle::Native), "বাংলা উত্তর");
        assert_eq!(record.localized_answer(LanguageStyle::Mixed), "english answer");
        assert_eq!(record.localized_answer(LanguageStyle::Plain), "english answer");

        let plain = SeedRecord::new("q", "only answer");
        assert_eq!(plain.localized_answer(LanguageStyle::Native), "only answer");
    }

    #[test]
    fn shipped_seed_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/seed_qas.json");
        let store = SeedStore::load(&path).expect("shipped seed file");
        assert!(!store.is_empty());
    }
}
