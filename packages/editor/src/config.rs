//! Editor configuration.
//!
//! Loaded from JSON (`trunk.config.json` or any path the host picks). Every
//! field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;

pub const DEFAULT_MAX_UNDO_LEVELS: usize = 100;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Root id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Undo batches kept before the oldest is dropped (0 = unlimited)
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Raise every reported error instead of consulting the error handler
    #[serde(default)]
    pub strict: bool,
}

fn default_max_undo_levels() -> usize {
    DEFAULT_MAX_UNDO_LEVELS
}

impl EditorConfig {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<FsPath>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id: None,
            max_undo_levels: default_max_undo_levels(),
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "id": "outline",
            "maxUndoLevels": 20,
            "strict": true
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.id.as_deref(), Some("outline"));
        assert_eq!(config.max_undo_levels, 20);
        assert!(config.strict);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.max_undo_levels, 100);
        assert!(!config.strict);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(EditorConfig::load("/nonexistent/trunk.config.json").is_err());
    }
}
