use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_BACKUP_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

const DEFAULT_INSTRUCTION: &str = "Reply in Benglish (mix of Bengali and English), friendly tone, \
     short and natural, relevant to the user's question only.";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub primary_model: String,
    pub backup_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout: Duration,
    pub fuzzy_threshold: f64,
    pub seed_path: Option<PathBuf>,
    pub instruction: String,
    pub fallback_messages: Vec<String>,
    pub app_name: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            backup_model: DEFAULT_BACKUP_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 512,
            request_timeout: Duration::from_secs(30),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            seed_path: None,
            instruction: DEFAULT_INSTRUCTION.to_string(),
            fallback_messages: vec![
                "Sorry re, amar connection ta thik nei, abar try korbe?".to_string(),
                "Hmm... ektu samasya holo, please try again!".to_string(),
            ],
            app_name: "LocGenAI".to_string(),
            window_width: 520.0,
            window_height: 680.0,
        }
    }
}

impl Config {
    /// Builds the configuration from `.env` and the process environment.
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let request_timeout = env_parse::<u64>("LOCGENAI_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let fuzzy_threshold = env_parse::<f64>("LOCGENAI_FUZZY_THRESHOLD")
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, 100.0))
            .unwrap_or(defaults.fuzzy_threshold);

        Self {
            gemini_api_key,
            gemini_base_url: env_string("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            primary_model: env_string("LOCGENAI_PRIMARY_MODEL").unwrap_or(defaults.primary_model),
            backup_model: env_string("LOCGENAI_BACKUP_MODEL").unwrap_or(defaults.backup_model),
            temperature: env_parse::<f32>("LOCGENAI_TEMPERATURE")
                .map(|t| t.clamp(0.0, 2.0))
                .unwrap_or(defaults.temperature),
            max_output_tokens: env_parse::<u32>("LOCGENAI_MAX_OUTPUT_TOKENS")
                .map(|n| n.max(1))
                .unwrap_or(defaults.max_output_tokens),
            request_timeout,
            fuzzy_threshold,
            seed_path: env_string("LOCGENAI_SEED_PATH").map(PathBuf::from),
            instruction: env_string("LOCGENAI_INSTRUCTION").unwrap_or(defaults.instruction),
            ..defaults
        }
    }

    /// Candidate seed files in lookup order.
    pub fn seed_path_candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.seed_path {
            return vec![path.clone()];
        }

        let mut candidates = vec![
            PathBuf::from("data/seed_qas.json"),
            PathBuf::from("seed_qas.json"),
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/seed_qas.json"),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("locgenai/seed_qas.json"));
        }
        candidates
    }

    /// First existing seed candidate, or the first candidate so that the
    /// load error names a meaningful path.
    pub fn resolve_seed_path(&self) -> PathBuf {
        let candidates = self.seed_path_candidates();
        candidates
            .iter()
            .find(|path| path.exists())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("data/seed_qas.json"))
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse::<T>().ok())
}
