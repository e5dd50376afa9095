//! Gemini LLM client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Advisor;
use crate::config::LlmConfig;
use crate::error::{ConfigError, Error, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` client.
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl GeminiAdvisor {
    /// Create a new Gemini client.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create from configuration, with the API key from `GEMINI_API_KEY`.
    pub fn from_env(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "GEMINI_API_KEY",
            })
        })?;
        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.max_tokens,
            config.temperature,
        ))
    }
}

#[derive(Serialize)]
struct Request {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: usize,
}

#[derive(Deserialize)]
struct Response {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Llm(e.to_string()))?
            .json::<Response>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .flatten()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(Error::Llm("empty completion".into()));
        }

        Ok(text)
    }
}
