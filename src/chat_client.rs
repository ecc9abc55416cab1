// ============================================================================
// File: src/chat_client.rs
// Azure OpenAI chat completions client
// ============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::models::{ChatRequest, ChatResponse, Message};

const API_VERSION: &str = "2024-02-15-preview";

pub struct ChatClient {
    client: Client,
    endpoint: String,
    deployment_name: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(endpoint: String, deployment_name: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            deployment_name,
            api_key,
        }
    }

    /// Send the question and the assembled context as a two-message exchange
    /// and return the first completion's text.
    pub async fn complete(&self, user_query: &str, context_block: &str) -> Result<String> {
        let request = ChatRequest::new(build_exchange(user_query, context_block));
        let url = self.completions_url();

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "Chat API error for deployment '{}': HTTP {}\nResponse: {}",
                self.deployment_name,
                status,
                error_text
            ));
        }

        // Try to parse the response, with better error handling
        let response_text = response.text().await?;
        let response_data: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            anyhow!(
                "Failed to parse response from deployment '{}': {}\nRaw response: {}",
                self.deployment_name,
                e,
                response_text
            )
        })?;

        let choice = response_data.choices.first().ok_or_else(|| {
            anyhow!(
                "Deployment '{}' returned no choices. Response may be empty.",
                self.deployment_name
            )
        })?;

        let content = choice.message.content.clone().unwrap_or_default();
        if content.is_empty() {
            return Err(anyhow!(
                "Deployment '{}' returned empty content.",
                self.deployment_name
            ));
        }

        Ok(content)
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment_name,
            API_VERSION
        )
    }
}

/// The exchange is always the raw question followed by a synthetic assistant
/// turn carrying the retrieved context. No system message, no prior turns.
fn build_exchange(user_query: &str, context_block: &str) -> Vec<Message> {
    vec![
        Message {
            role: "user".to_string(),
            content: user_query.to_string(),
        },
        Message {
            role: "assistant".to_string(),
            content: format!("Here is some context based on our data:\n{}", context_block),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_is_question_then_context_turn() {
        let messages = build_exchange("Who built the Eiffel Tower?", "Gustave Eiffel's company built it. ([1] Tower History)");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "Who built the Eiffel Tower?");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(
            messages[1].content,
            "Here is some context based on our data:\nGustave Eiffel's company built it. ([1] Tower History)"
        );
    }

    #[test]
    fn completions_url_targets_the_deployment() {
        let client = ChatClient::new(
            "https://my-resource.openai.azure.com/".to_string(),
            "gpt-4o".to_string(),
            "key".to_string(),
        );
        assert_eq!(
            client.completions_url(),
            format!(
                "https://my-resource.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version={}",
                API_VERSION
            )
        );
    }
}
