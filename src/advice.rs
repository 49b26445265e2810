//! Client for the external text-generation service behind `/api/advice`.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. The call is
//! fire-and-forget from the core's perspective: a single attempt under one
//! timeout, with every failure surfaced as a structured error for the HTTP
//! layer to report.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{Quote, QuoteRequest};

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("advice request failed: {0}")]
    Network(String),
    #[error("advice upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid advice response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            endpoint: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct AdviceClient {
    config: AdviceConfig,
    client: Client,
}

impl AdviceClient {
    pub fn new(config: AdviceConfig) -> Result<Self, AdviceError> {
        if config.api_key.is_empty() {
            return Err(AdviceError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdviceError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Asks the upstream model for a short recommendation covering the
    /// selected plan against the alternatives. Falls back to a fixed
    /// placeholder when the upstream answers with no content.
    pub async fn advise(
        &self,
        form: &QuoteRequest,
        quotes: &[Quote],
        selected: &Quote,
    ) -> Result<String, AdviceError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(form, quotes, selected),
            }],
            temperature: self.config.temperature,
        };

        debug!(model = %request.model, quotes = quotes.len(), "requesting plan advice");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdviceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdviceError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| "No response".to_string()))
    }
}

fn build_prompt(form: &QuoteRequest, quotes: &[Quote], selected: &Quote) -> String {
    let selected_json = serde_json::to_string_pretty(selected).unwrap_or_default();
    let quotes_json = serde_json::to_string_pretty(quotes).unwrap_or_default();
    format!(
        "You are an insurance assistant. Explain whether this car insurance \
         plan fits the user.\n\n\
         User car details:\n\
         - Vehicle Value (IDV): {idv}\n\
         - Car Age: {age} years\n\
         - City Tier: {tier:?}\n\
         - NCB Discount: {ncb}%\n\n\
         Selected plan:\n{selected_json}\n\n\
         Other available plans:\n{quotes_json}\n\n\
         Answer briefly:\n\
         1) Best for (who should buy)\n\
         2) Why recommended (3 bullet points)\n\
         3) Watchouts (2 bullet points)\n\
         4) Add-on suggestion (1-2 bullet points)\n\
         5) Final verdict (1 line)\n",
        idv = form.vehicle_value,
        age = form.car_age,
        tier = form.city_tier,
        ncb = form.ncb_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::INSURERS;
    use crate::core::{CityTier, assemble_quotes};

    fn sample_config() -> AdviceConfig {
        AdviceConfig {
            api_key: "test-key".to_string(),
            ..AdviceConfig::default()
        }
    }

    #[test]
    fn default_config_targets_the_expected_model() {
        let config = AdviceConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.4);
        assert!(config.endpoint.starts_with("http"));
    }

    #[test]
    fn client_requires_an_api_key() {
        let config = AdviceConfig {
            api_key: String::new(),
            ..sample_config()
        };
        assert!(matches!(
            AdviceClient::new(config),
            Err(AdviceError::MissingApiKey)
        ));
    }

    #[test]
    fn prompt_carries_form_and_plan_details() {
        let form = QuoteRequest {
            vehicle_value: 600_000.0,
            car_age: 2.0,
            city_tier: CityTier::Tier1,
            ncb_percent: 20.0,
            selected_addons: vec!["zeroDep".to_string()],
        };
        let quotes = assemble_quotes(&INSURERS, &form);
        let prompt = build_prompt(&form, &quotes, &quotes[3]);

        assert!(prompt.contains("600000"));
        assert!(prompt.contains("HDFC ERGO"));
        assert!(prompt.contains("Final verdict"));
    }

    #[test]
    fn upstream_error_preserves_status_and_body() {
        let err = AdviceError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "advice upstream returned 429: rate limited");
    }

    #[test]
    fn chat_response_parses_missing_content_as_none() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }
}
