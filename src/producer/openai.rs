use super::prompt::build_system_prompt;
use super::traits::PlanProducer;
use crate::config::ProducerConfig;
use crate::error::ProducerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Plan producer backed by any chat-completions compatible API.
pub struct OpenAiProducer {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiProducer {
    pub fn new(api_key: Option<String>, config: &ProducerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl PlanProducer for OpenAiProducer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn produce(&self, objective: &str, catalog: &str) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProducerError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: build_system_prompt(catalog),
                },
                Message {
                    role: "user",
                    content: objective.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "requesting plan draft");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{} request failed: {e}", self.name()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(300).collect();
            return Err(anyhow::anyhow!(
                "{} returned HTTP {status}: {excerpt}",
                self.name()
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("{} response JSON decode failed: {e}", self.name()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from {}", self.name()))
    }
}
