//! Conversational companion client.
//!
//! Sends free text to an OpenAI-compatible chat completions endpoint and
//! returns the reply. The companion is optional and may fail independently;
//! callers render the deterministic classification first and treat any
//! companion error as non-blocking.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CompanionError;
use crate::storage::CompanionSettings;

const SYSTEM_PROMPT: &str = "\
You are a calm, empathetic wellbeing support assistant.
Offer emotional support and general coping strategies only.
Never diagnose a medical or mental health condition, never prescribe \
medication or treatment, and never claim to be a doctor.
Encourage the user to seek professional help when stress feels overwhelming, \
and urge them to contact someone immediately if they express hopelessness, \
panic or acute distress.
Keep replies supportive and non-judgmental.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for the companion endpoint.
#[derive(Debug, Clone)]
pub struct CompanionClient {
    http: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl CompanionClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, CompanionError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|u| u.join("v1/chat/completions"))
            .map_err(|e| CompanionError::NotConfigured(format!("invalid base_url '{base_url}': {e}")))?;

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from the `[companion]` config section.
    ///
    /// Fails with [`CompanionError::NotConfigured`] when the companion is
    /// disabled or its API key variable is unset.
    pub fn from_settings(settings: &CompanionSettings) -> Result<Self, CompanionError> {
        if !settings.enabled {
            return Err(CompanionError::NotConfigured(
                "set companion.enabled = true".to_string(),
            ));
        }
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CompanionError::NotConfigured(format!("{} is not set", settings.api_key_env))
            })?;

        Self::new(
            &settings.base_url,
            &settings.model,
            &api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the companion and return its reply text.
    pub async fn ask(&self, message: &str) -> Result<String, CompanionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CompanionError::EmptyMessage);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "asking companion");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "companion returned an error status");
            return Err(CompanionError::Unavailable {
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| CompanionError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| CompanionError::MalformedResponse("no reply content".to_string()))
    }
}
