use super::{Generation, ModelBackend};
use crate::config::Config;
use crate::core::sources;
use crate::error::{ChatError, Result};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Client for the Google Gemini `generateContent` REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
    pub citation_metadata: Option<CitationMetadata>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetadata {
    #[serde(default, alias = "citations")]
    pub citation_sources: Vec<CitationSource>,
}

#[derive(Debug, Deserialize)]
pub struct CitationSource {
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate plus the links from its citation and
    /// grounding metadata.
    pub fn into_generation(self) -> anyhow::Result<Generation> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let candidate = match self.candidates.into_iter().next() {
            Some(c) => c,
            None => match block_reason {
                Some(reason) => anyhow::bail!("prompt blocked: {reason}"),
                None => anyhow::bail!("no candidates in response"),
            },
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            anyhow::bail!("empty response (finish reason: {reason})");
        }

        let mut found = Vec::new();
        if let Some(citations) = candidate.citation_metadata {
            sources::merge_sources(
                &mut found,
                citations.citation_sources.into_iter().filter_map(|c| c.uri),
            );
        }
        if let Some(grounding) = candidate.grounding_metadata {
            sources::merge_sources(
                &mut found,
                grounding
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|c| c.web.and_then(|w| w.uri)),
            );
        }

        Ok(Generation { text, sources: found })
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Checks that an API key is available
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }

    async fn request(&self, model: &str, prompt: &str) -> anyhow::Result<Generation> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => anyhow::bail!("GEMINI_API_KEY is not configured"),
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("request failed")?;

        let status = response.status();
        let text = response.text().await.context("failed to read response body")?;

        if !status.is_success() {
            anyhow::bail!("Gemini API error: {} - {}", status, truncate(&text, 300));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).context("invalid response JSON")?;
        parsed.into_generation()
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation> {
        log::debug!("📡 Gemini {model}: {} prompt chars", prompt.chars().count());
        self.request(model, prompt)
            .await
            .map_err(|e| ChatError::remote(model, format!("{e:#}")))
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
