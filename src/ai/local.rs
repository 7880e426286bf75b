//! Local answers from the curated seed list.

use super::similarity::token_set_ratio;
use crate::config::DEFAULT_FUZZY_THRESHOLD;
use crate::services::SeedRecord;
use std::collections::{BTreeSet, HashSet};

/// Question words and copulas that carry no topic. They are ignored by the
/// fuzzy pass so "poila boishakh kobe?" lines up with "When is Poila
/// Boishakh?".
pub const DEFAULT_FILLER_WORDS: &[&str] = &[
    // English
    "a", "an", "the", "is", "are", "was", "were", "do", "does", "did", "what", "when", "where",
    "who", "whom", "why", "how", "which", "tell", "me", "about", "please",
    // Romanised Bengali
    "ki", "kobe", "keno", "kothay", "kotha", "kemon", "kon", "koto", "ke", "kake", "hoy", "holo",
    "bolo", "bolun", "ta", "ti",
];

/// Seed lookup outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub record: &'a SeedRecord,
    pub score: f64,
    pub matched_exactly: bool,
}

#[derive(Debug, Clone)]
pub struct SeedMatcher {
    threshold: f64,
    filler_words: HashSet<String>,
}

impl Default for SeedMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl SeedMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 100.0),
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Replaces the filler-word list. An empty list compares every token.
    pub fn with_filler_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filler_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Exact match first, then the best fuzzy match at or above the
    /// threshold. The exact pass has two tiers: a case-insensitive equal
    /// question, then one equal after punctuation is ignored. Within a tier
    /// the first record in load order wins.
    pub fn find_match<'a>(&self, query: &str, records: &'a [SeedRecord]) -> Option<MatchResult<'a>> {
        let raw_query = query.trim().to_lowercase();
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let exact = records
            .iter()
            .find(|r| r.question.trim().to_lowercase() == raw_query)
            .or_else(|| records.iter().find(|r| normalize(&r.question) == query));
        if let Some(record) = exact {
            return Some(MatchResult {
                record,
                score: 100.0,
                matched_exactly: true,
            });
        }

        let query_tokens = self.content_tokens(&query);
        let mut best: Option<MatchResult<'a>> = None;

        for record in records {
            let question = normalize(&record.question);
            let score = token_set_ratio(&query_tokens, &self.content_tokens(&question));
            // strict > keeps the earliest record on ties
            if best.map_or(true, |b| score > b.score) {
                best = Some(MatchResult {
                    record,
                    score,
                    matched_exactly: false,
                });
            }
        }

        match best {
            Some(m) if m.score >= self.threshold && m.score > 0.0 => {
                log::debug!("🔎 Fuzzy seed match {:.1}: {}", m.score, m.record.question);
                Some(m)
            }
            Some(m) => {
                log::debug!("🔎 Closest seed scored {:.1}, below {:.1}", m.score, self.threshold);
                None
            }
            None => None,
        }
    }

    fn content_tokens<'t>(&self, normalized: &'t str) -> BTreeSet<&'t str> {
        let all: BTreeSet<&str> = normalized.split_whitespace().collect();
        let content: BTreeSet<&str> = all
            .iter()
            .copied()
            .filter(|token| !self.filler_words.contains(*token))
            .collect();

        if content.is_empty() {
            all
        } else {
            content
        }
    }
}

/// Lower-cases, turns punctuation into spaces and collapses whitespace.
pub fn normalize(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || is_combining_mark(c) { c } else { ' ' })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Viramas and some vowel signs are not alphanumeric but belong to the word.
// U+0964/U+0965 (dandas) stay sentence punctuation.
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{0900}'..='\u{0963}' | '\u{0966}'..='\u{09FF}')
}
