use crate::config::AiConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reply used when no API token is configured
pub const FALLBACK_NOT_CONFIGURED: &str =
    "I'm sorry, I can't process that right now. Please configure the AI token.";

/// Reply used when the completion service cannot be reached
pub const FALLBACK_UNAVAILABLE: &str =
    "I'm having trouble connecting to the AI service. Please try again later.";

const SYSTEM_PROMPT: &str = "You are an AI commuter assistant for Parañaque City in Metro Manila.
Your job is to help users understand their current location and nearby landmarks.

Rules:
- Only use the provided latitude, longitude, and landmark data.
- Do NOT guess locations.
- Explain in simple, clear, and friendly language.
- If landmarks are given, describe where the user is based on them.
- Keep answers short and helpful.";

/// HTTP client for the chat completion service.
///
/// `ask` never fails: a missing token or an upstream error degrades to a
/// static fallback reply so the chat endpoint never surfaces a 5xx.
#[derive(Clone)]
pub struct AiClient {
    client: reqwest::Client,
    endpoint: Arc<str>,
    model: Arc<str>,
    token: Option<Arc<str>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

impl AiClient {
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: Arc::from(config.endpoint.as_str()),
            model: Arc::from(config.model.as_str()),
            token: config.token.as_deref().map(Arc::from),
        }
    }

    /// Answer a location question. Always returns a reply string.
    #[tracing::instrument(skip(self, message, landmarks))]
    pub async fn ask(&self, message: &str, lat: f64, lng: f64, landmarks: &[String]) -> String {
        let Some(token) = &self.token else {
            tracing::warn!("AI token is not configured, using fallback response");
            return FALLBACK_NOT_CONFIGURED.to_string();
        };

        match self.request(token, message, lat, lng, landmarks).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("AI service error: {:#}", e);
                FALLBACK_UNAVAILABLE.to_string()
            }
        }
    }

    async fn request(
        &self,
        token: &str,
        message: &str,
        lat: f64,
        lng: f64,
        landmarks: &[String],
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        let req = CompletionRequest {
            model: self.model.to_string(),
            temperature: 0.3,
            max_tokens: 300,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(message, lat, lng, landmarks),
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&req)
            .send()
            .await
            .context("Failed to send completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            anyhow::bail!("Completion failed with status {}: {}", status, body);
        }

        let resp: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;
        let choice = resp
            .choices
            .into_iter()
            .next()
            .context("Completion response has no choices")?;
        Ok(choice.message.content)
    }
}

/// Build the user turn embedding coordinates and nearby landmark names
fn user_prompt(message: &str, lat: f64, lng: f64, landmarks: &[String]) -> String {
    let landmark_list = if landmarks.is_empty() {
        "None detected".to_string()
    } else {
        landmarks.join(", ")
    };
    format!(
        "User GPS location:\nLatitude: {}\nLongitude: {}\n\nNearby landmarks:\n{}\n\nUser question:\n{}",
        lat, lng, landmark_list, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_coordinates_and_landmarks() {
        let prompt = user_prompt(
            "Where am I?",
            14.4793,
            121.0198,
            &["City Mall".to_string(), "General Hospital".to_string()],
        );
        assert!(prompt.contains("Latitude: 14.4793"));
        assert!(prompt.contains("Longitude: 121.0198"));
        assert!(prompt.contains("City Mall, General Hospital"));
        assert!(prompt.contains("Where am I?"));
    }

    #[test]
    fn test_user_prompt_empty_landmarks_sentinel() {
        let prompt = user_prompt("Where am I?", 14.0, 121.0, &[]);
        assert!(prompt.contains("None detected"));
    }

    #[tokio::test]
    async fn test_ask_without_token_uses_fallback() {
        let client = AiClient::from_config(&AiConfig {
            token: None,
            endpoint: "https://models.github.ai/inference".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
        });
        let reply = client.ask("hello", 14.0, 121.0, &[]).await;
        assert_eq!(reply, FALLBACK_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_ask_relays_empty_message() {
        // Blank questions are passed through, not rejected
        let client = AiClient::from_config(&AiConfig {
            token: None,
            endpoint: "https://models.github.ai/inference".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
        });
        let reply = client.ask("", 14.0, 121.0, &[]).await;
        assert_eq!(reply, FALLBACK_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_ask_with_unreachable_endpoint_uses_fallback() {
        // Nothing listens on the discard port, so the connection is refused
        let client = AiClient::from_config(&AiConfig {
            token: Some("test-token".to_string()),
            endpoint: "http://127.0.0.1:9".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
        });
        let reply = client.ask("hello", 14.0, 121.0, &[]).await;
        assert_eq!(reply, FALLBACK_UNAVAILABLE);
    }
}
