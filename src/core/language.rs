use serde::Serialize;
use std::collections::HashSet;

/// Common romanised Bengali and Hindi words. Words that double as English
/// words or names ("hum", "mein", "dao", "kab", "kobe") are left out.
pub const DEFAULT_ROMANIZED_MARKERS: &[&str] = &[
    // Bengali
    "ami", "amar", "amake", "amra", "tumi", "tomar", "tomake", "apni", "apnar", "korbo", "korchi",
    "korte", "korechi", "achhe", "achho", "acho", "achi", "nei", "hobe", "bhalo", "kemon",
    "kothay", "ekta", "kichu", "ektu", "khub", "jabo", "bolo", "bolchi", "shob",
    // Hindi
    "kya", "kaise", "kaisa", "kyun", "kahan", "nahi", "nahin", "hai", "hain", "accha", "kitna",
    "yeh", "woh", "mujhe", "kuch",
];

/// Distinct marker words an ASCII-only message needs before it counts as
/// code-mixed.
pub const MIN_MARKER_HITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageStyle {
    /// ASCII text without code-switching.
    Plain,
    /// Two languages or scripts blended in one message.
    Mixed,
    /// Non-Latin script only.
    Native,
}

impl LanguageStyle {
    /// Instruction line for the remote prompt, if any.
    pub fn prompt_hint(self) -> Option<&'static str> {
        match self {
            LanguageStyle::Plain => None,
            LanguageStyle::Mixed => {
                Some("Respond in the same code-mixed language style as the user.")
            }
            LanguageStyle::Native => Some("Respond in the same native language as the user."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageDetector {
    romanized_markers: HashSet<String>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::with_markers(DEFAULT_ROMANIZED_MARKERS.iter().copied())
    }
}

impl LanguageDetector {
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            romanized_markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn detect(&self, text: &str) -> LanguageStyle {
        let has_ascii_letters = text.chars().any(|c| c.is_ascii_alphabetic());
        let has_non_ascii = text.chars().any(|c| !c.is_ascii());

        match (has_ascii_letters, has_non_ascii) {
            (true, true) => LanguageStyle::Mixed,
            (false, true) => LanguageStyle::Native,
            (true, false) if self.marker_hits(text) >= MIN_MARKER_HITS => LanguageStyle::Mixed,
            _ => LanguageStyle::Plain,
        }
    }

    fn marker_hits(&self, text: &str) -> usize {
        text.split(|c: char| !c.is_ascii_alphabetic())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_ascii_lowercase())
            .filter(|w| self.romanized_markers.contains(w))
            .collect::<HashSet<_>>()
            .len()
    }
}
