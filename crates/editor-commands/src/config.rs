//! Editor configuration consumed by the commands (indentation style and width).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an indent unit is represented in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabType {
    /// One `\t` per indent unit.
    Hard,
    /// `indent_size` spaces per indent unit.
    #[default]
    Soft,
}

/// Indentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Tab style.
    pub tab_type: TabType,
    /// Width of one indent unit in columns. Must be positive; commands treat zero as one.
    pub indent_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_type: TabType::Soft,
            indent_size: 2,
        }
    }
}

/// Errors raised while loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("invalid editor config: {0}")]
    Parse(#[from] toml::de::Error),
    /// `indent-size` was zero.
    #[error("indent-size must be positive, got {0}")]
    InvalidIndentSize(usize),
}

impl EditorConfig {
    /// Soft tabs of the given width.
    pub fn soft(indent_size: usize) -> Self {
        Self {
            tab_type: TabType::Soft,
            indent_size,
        }
    }

    /// Hard tabs displayed `indent_size` columns wide.
    pub fn hard(indent_size: usize) -> Self {
        Self {
            tab_type: TabType::Hard,
            indent_size,
        }
    }

    /// Parse a config from TOML, e.g. `tab-type = "hard"` / `indent-size = 4`.
    /// Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_size == 0 {
            return Err(ConfigError::InvalidIndentSize(self.indent_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_two_soft_spaces() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_type, TabType::Soft);
        assert_eq!(config.indent_size, 2);
        assert_eq!(EditorConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_from_toml_str() {
        let config = EditorConfig::from_toml_str("tab-type = \"hard\"\nindent-size = 8\n").unwrap();
        assert_eq!(config, EditorConfig::hard(8));
    }

    #[test]
    fn test_rejects_zero_indent_and_unknown_keys() {
        assert!(matches!(
            EditorConfig::from_toml_str("indent-size = 0"),
            Err(ConfigError::InvalidIndentSize(0))
        ));
        assert!(matches!(
            EditorConfig::from_toml_str("tab-width = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
