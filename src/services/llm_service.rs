// src/services/llm_service.rs
use crate::errors::HoloBrandError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::json;
use std::time::{Duration, Instant};

/// Best-effort text completion. Callers treat any error as "no text
/// available".
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, HoloBrandError>;
}

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct LLMService {
    openai_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl LLMService {
    /// Every request, body included, is abandoned after `timeout`.
    pub fn new(
        openai_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, HoloBrandError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            HoloBrandError::NotConfigured(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            openai_key,
            model,
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
            client,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn request_error(e: reqwest::Error) -> HoloBrandError {
    if e.is_timeout() {
        HoloBrandError::TextGeneration(format!("OpenAI request timed out: {}", e))
    } else {
        HoloBrandError::TextGeneration(format!("OpenAI request failed: {}", e))
    }
}

#[async_trait]
impl TextGenerator for LLMService {
    async fn generate_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, HoloBrandError> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.openai_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "max_tokens": max_tokens,
                "temperature": temperature
            }))
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(HoloBrandError::TextGeneration(format!(
                "OpenAI error: {}",
                error_text
            )));
        }

        let result: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                request_error(e)
            } else {
                HoloBrandError::TextGeneration(format!("Failed to parse OpenAI response: {}", e))
            }
        })?;

        let content = result["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                HoloBrandError::TextGeneration("No content in OpenAI response".to_string())
            })?;

        debug!(
            "OpenAI completion ({} tokens max) took {} ms",
            max_tokens,
            start.elapsed().as_millis()
        );

        Ok(content.trim().to_string())
    }
}
