//! Ollama HTTP client for local model inference.

use serde::{Deserialize, Serialize};

use super::AssistantError;
use crate::config::Settings;

pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new client pointing at an Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.ollama_base_url, settings.ollama_timeout_secs)
    }

    /// Run one non-streaming generation.
    pub async fn generate(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, AssistantError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(AssistantError::BadStatus(response.status().as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Http(e.to_string()))?;
        Ok(parsed.response)
    }

    /// List the models the Ollama instance has pulled.
    pub async fn list_models(&self) -> Result<Vec<String>, AssistantError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(AssistantError::BadStatus(response.status().as_u16()));
        }

        let parsed: TagsResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Http(e.to_string()))?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_connect() {
            AssistantError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AssistantError::Timeout(self.timeout_secs)
        } else {
            AssistantError::Http(e.to_string())
        }
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TaggedModel>,
}

#[derive(Deserialize)]
struct TaggedModel {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = OllamaClient::new("http://localhost:11434/", 10);
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn generate_request_serializes_non_streaming() {
        let body = GenerateRequest {
            model: "gemma3-doctor:latest",
            prompt: "question",
            system: "system",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gemma3-doctor:latest");
        assert_eq!(json["stream"], false);
    }
}
