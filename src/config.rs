//! Processor configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! output_suffix = ".simplified"
//! key_presence = "strict"
//! failure_policy = "drop"
//!
//! [params]
//! weld_distance = 1.5
//! ```

use colcrate_core::{Error, Result};
use colcrate_io::{KeyPresence, DEFAULT_SUFFIX};
use colcrate_simplification::SimplifyParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to emit for a group whose simplification failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFailurePolicy {
    /// Re-emit the group's original triangle lines
    #[default]
    PassThrough,
    /// Emit nothing for the group
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub params: SimplifyParams,
    pub key_presence: KeyPresence,
    pub output_suffix: String,
    pub failure_policy: GroupFailurePolicy,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            params: SimplifyParams::default(),
            key_presence: KeyPresence::default(),
            output_suffix: DEFAULT_SUFFIX.to_string(),
            failure_policy: GroupFailurePolicy::default(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn with_params(mut self, params: SimplifyParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_key_presence(mut self, key_presence: KeyPresence) -> Self {
        self.key_presence = key_presence;
        self
    }

    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: GroupFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ProcessorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProcessorConfig::default());
        assert_eq!(config.output_suffix, ".new");
        assert_eq!(config.params.weld_distance, 2.5);
    }

    #[test]
    fn test_partial_document() {
        let config = ProcessorConfig::from_toml_str(
            r#"
key_presence = "strict"
failure_policy = "drop"

[params]
weld_distance = 1.5
"#,
        )
        .unwrap();
        assert_eq!(config.key_presence, KeyPresence::Strict);
        assert_eq!(config.failure_policy, GroupFailurePolicy::Drop);
        assert_eq!(config.params.weld_distance, 1.5);
        assert_eq!(config.params.dissolve_angle, SimplifyParams::default().dissolve_angle);
        assert_eq!(config.output_suffix, ".new");
    }

    #[test]
    fn test_invalid_document() {
        let err = ProcessorConfig::from_toml_str("failure_policy = \"retry\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colcrate.toml");
        std::fs::write(&path, "output_suffix = \".out\"\n").unwrap();
        assert_eq!(ProcessorConfig::load(&path).unwrap().output_suffix, ".out");
        assert!(matches!(
            ProcessorConfig::load(dir.path().join("missing.toml")),
            Err(Error::Io { .. })
        ));
    }
}
