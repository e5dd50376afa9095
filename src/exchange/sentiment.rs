//! alternative.me fear & greed index client.
//!
//! One endpoint, independent of any instrument symbol, returning the most
//! recent observation as a value/classification pair.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use super::SentimentSource;
use crate::config::SentimentConfig;
use crate::domain::{FetchOutcome, Sentiment, SentimentGrade};

/// HTTP client for the alternative.me sentiment API.
pub struct SentimentIndexClient {
    http: HttpClient,
    base_url: String,
}

impl SentimentIndexClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(HttpClient::new(), base_url)
    }

    #[must_use]
    pub fn from_config(config: &SentimentConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self::with_http(http, config.base_url.clone())
    }

    fn with_http(http: HttpClient, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }
}

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Option<Vec<FngObservationDto>>,
}

#[derive(Debug, Deserialize)]
struct FngObservationDto {
    value: Option<String>,
    value_classification: Option<String>,
}

fn parse_observation(dto: &FngObservationDto) -> FetchOutcome<Sentiment> {
    let Some(raw) = dto.value.as_deref() else {
        return FetchOutcome::Fallback("missing value".into());
    };
    let Ok(value) = raw.parse::<f64>() else {
        return FetchOutcome::Fallback(format!("unparsable value: {raw:?}"));
    };

    // A missing classification degrades the grade alone, not the value.
    let grade = dto
        .value_classification
        .as_deref()
        .map(SentimentGrade::parse)
        .unwrap_or_default();

    FetchOutcome::Value(Sentiment { value, grade })
}

#[async_trait]
impl SentimentSource for SentimentIndexClient {
    async fn fear_greed_index(&self) -> FetchOutcome<Sentiment> {
        let url = format!("{}/fng/?limit=1", self.base_url);
        debug!(url = %url, "fetching");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failure(e.to_string()),
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failure(e.to_string()),
        };
        let parsed = match response.json::<FngResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => return FetchOutcome::Failure(e.to_string()),
        };

        match parsed.data.as_deref().and_then(|rows| rows.first()) {
            Some(dto) => parse_observation(dto),
            None => FetchOutcome::Fallback("empty index series".into()),
        }
    }
}
