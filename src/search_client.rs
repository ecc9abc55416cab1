// ============================================================================
// File: src/search_client.rs
// Azure AI Search client
// ============================================================================

use anyhow::Result;
use reqwest::Client;

use crate::models::{SearchDocument, SearchRequest, SearchResponse};

const API_VERSION: &str = "2023-11-01";

pub struct SearchClient {
    client: Client,
    endpoint: String,
    index_name: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(endpoint: String, index_name: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            index_name,
            api_key,
        }
    }

    /// Run one full-text query and return the hits in service order, along
    /// with the total hit count when the service reports one.
    pub async fn search(&self, query: &str) -> Result<(Vec<SearchDocument>, Option<u64>)> {
        let url = self.search_url();
        let request = SearchRequest {
            search: query,
            count: true,
            query_type: "full",
        };

        let http_response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        // Check HTTP status
        if !http_response.status().is_success() {
            let status = http_response.status();
            let error_text = http_response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Search API error: HTTP {}\nURL: {}\nResponse: {}",
                status,
                url,
                error_text
            ));
        }

        // Get the raw response text, then parse with better error handling
        let response_text = http_response.text().await?;
        let response: SearchResponse = serde_json::from_str(&response_text).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse search response as JSON: {}\nURL: {}\nRaw response (first 500 chars): {}",
                e,
                url,
                response_text.chars().take(500).collect::<String>()
            )
        })?;

        Ok((response.value, response.total_count))
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index_name,
            API_VERSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_targets_the_index_docs_endpoint() {
        let client = SearchClient::new(
            "https://my-service.search.windows.net/".to_string(),
            "manuals".to_string(),
            "key".to_string(),
        );
        assert_eq!(
            client.search_url(),
            format!(
                "https://my-service.search.windows.net/indexes/manuals/docs/search?api-version={}",
                API_VERSION
            )
        );
    }
}
