use serde::{Deserialize, Serialize};
use thiserror::Error;

use crack_mask::PipelineConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Service settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub model_path: String,
    /// Larger request bodies are refused with 413.
    pub max_upload_bytes: usize,
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "127.0.0.1:8000".to_owned(),
            model_path: "models/crack_classifier.json".to_owned(),
            max_upload_bytes: 20 * 1024 * 1024,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load_json(path: &str) -> Result<ServerConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Applies `CRACK_MASK_ADDR` and `CRACK_MASK_MODEL` from `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> ServerConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("CRACK_MASK_ADDR").filter(|s| !s.is_empty()) {
            self.addr = addr;
        }
        if let Some(model) = lookup("CRACK_MASK_MODEL").filter(|s| !s.is_empty()) {
            self.model_path = model;
        }
        self
    }
}
