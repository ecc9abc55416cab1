// ============================================================================
// File: src/models.rs
// API request and response models
// ============================================================================

use serde::{Deserialize, Serialize};

// Sampling parameters sent with every completion. Fixed; never varied per
// request.
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const FREQUENCY_PENALTY: f32 = 0.0;
pub const PRESENCE_PENALTY: f32 = 0.0;
pub const MAX_TOKENS: u32 = 500;

/// Message structure for the chat exchange
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: String, // "user" or "assistant"
    pub content: String,
}

/// Request structure for the chat completions endpoint
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Wrap the messages with the fixed sampling parameters
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Response structure from the chat completions endpoint
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// Individual completion choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Message in the completion response
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Request body for the search endpoint
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    /// Free-text query
    pub search: &'a str,
    /// Ask the service to track the total hit count
    pub count: bool,
    /// "full" selects the full Lucene query syntax
    #[serde(rename = "queryType")]
    pub query_type: &'a str,
}

/// Response from the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "@odata.count")]
    pub total_count: Option<u64>,
    pub value: Vec<SearchDocument>,
}

/// One retrieved document. Only the fields the assistant reads are modeled;
/// `content` is required by the index schema, `title` may be absent. Any
/// other fields the service returns are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchDocument {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
}
