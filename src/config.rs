// ============================================================================
// File: src/config.rs
// Configuration structures and layered loading
// ============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override file-based settings. These are the
/// secret-store layer: keys land here in deployment environments instead of
/// being written into the settings file.
const ENV_OVERRIDES: &[(&str, &[&str])] = &[
    ("AZURE_OPENAI_ENDPOINT", &["AzureOpenAI", "Endpoint"]),
    ("AZURE_OPENAI_DEPLOYMENT_NAME", &["AzureOpenAI", "DeploymentName"]),
    ("AZURE_OPENAI_API_KEY", &["AzureOpenAI", "ApiKey"]),
    ("AZURE_SEARCH_ENDPOINT", &["AzureSearch", "Endpoint"]),
    ("AZURE_SEARCH_INDEX_NAME", &["AzureSearch", "IndexName"]),
    ("AZURE_SEARCH_API_KEY", &["AzureSearch", "ApiKey"]),
];

/// Main configuration structure, assembled from the settings file, an
/// optional `<name>.local.<ext>` override file, and environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Azure OpenAI connection settings
    #[serde(rename = "AzureOpenAI", default)]
    pub azure_openai: AzureOpenAiConfig,

    /// Azure AI Search connection settings
    #[serde(rename = "AzureSearch", default)]
    pub azure_search: AzureSearchConfig,
}

/// Azure OpenAI resource settings
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AzureOpenAiConfig {
    /// Base URL of the resource (e.g. "https://my-resource.openai.azure.com")
    #[serde(default)]
    pub endpoint: String,

    /// Name of the chat model deployment to call
    #[serde(default)]
    pub deployment_name: String,

    /// API key for the resource
    #[serde(default)]
    pub api_key: String,
}

/// Azure AI Search service settings
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AzureSearchConfig {
    /// Base URL of the service (e.g. "https://my-service.search.windows.net")
    #[serde(default)]
    pub endpoint: String,

    /// Name of the index to query
    #[serde(default)]
    pub index_name: String,

    /// Query key for the service
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    /// Load and layer the configuration sources, later layers winning
    pub fn load(path: &Path) -> Result<Self> {
        let base = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read settings file {}: {}", path.display(), e))?;
        let mut settings: Value = serde_json::from_str(&base)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings file {}: {}", path.display(), e))?;

        let local_path = local_override_path(path);
        if local_path.exists() {
            let local = fs::read_to_string(&local_path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", local_path.display(), e))?;
            let overrides: Value = serde_json::from_str(&local)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", local_path.display(), e))?;
            merge_json(&mut settings, overrides);
        }

        apply_env_overrides(&mut settings);

        let config: Config = serde_json::from_value(settings)
            .map_err(|e| anyhow::anyhow!("Invalid settings in {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration: every key is required, no defaults
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("AzureOpenAI:Endpoint", &self.azure_openai.endpoint),
            ("AzureOpenAI:DeploymentName", &self.azure_openai.deployment_name),
            ("AzureOpenAI:ApiKey", &self.azure_openai.api_key),
            ("AzureSearch:Endpoint", &self.azure_search.endpoint),
            ("AzureSearch:IndexName", &self.azure_search.index_name),
            ("AzureSearch:ApiKey", &self.azure_search.api_key),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("Setting {} is required", key));
            }
        }

        Ok(())
    }
}

/// Path of the optional override file: "appsettings.json" pairs with
/// "appsettings.local.json"
fn local_override_path(path: &Path) -> PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path.with_file_name(format!(
            "{}.local.{}",
            stem.to_string_lossy(),
            ext.to_string_lossy()
        )),
        _ => path.with_extension("local"),
    }
}

/// Deep-merge `overrides` into `settings`; override scalars replace base ones
fn merge_json(settings: &mut Value, overrides: Value) {
    match (settings, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                merge_json(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn apply_env_overrides(settings: &mut Value) {
    for (var, json_path) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            set_json_path(settings, json_path, Value::String(value));
        }
    }
}

/// Insert `value` at the nested object path, creating objects along the way
fn set_json_path(node: &mut Value, json_path: &[&str], value: Value) {
    match json_path {
        [] => *node = value,
        [key, rest @ ..] => {
            if !node.is_object() {
                *node = Value::Object(serde_json::Map::new());
            }
            if let Some(map) = node.as_object_mut() {
                set_json_path(map.entry((*key).to_string()).or_insert(Value::Null), rest, value);
            }
        }
    }
}
