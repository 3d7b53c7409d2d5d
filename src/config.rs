//! CLI configuration: lookup tables and the link parameter name.
//!
//! A config file is the JSON form of the lookup tables with an optional
//! `param` field:
//!
//! ```json
//! { "keys": ["C", "G"], "modes": ["Ionian"], "instruments": ["electric_piano_1"],
//!   "chords": [{ "name": "C", "notes": "C, E, G" }], "param": "s" }
//! ```

use anyhow::{Context, Result};
use chordlink_core::{LinkConfig, LookupContext};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    tables: LookupContext,
    #[serde(default)]
    param: Option<String>,
}

/// Everything the commands need to talk to the codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tables: LookupContext,
    pub link: LinkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables: LookupContext::builtin(),
            link: LinkConfig::default(),
        }
    }
}

impl Config {
    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(text).context("Invalid lookup table JSON")?;
        if let Some(table) = file.tables.missing_table() {
            anyhow::bail!("Lookup table '{}' is empty", table);
        }

        let link = match file.param {
            Some(param) if !param.is_empty() => LinkConfig { param },
            _ => LinkConfig::default(),
        };
        Ok(Self {
            tables: file.tables,
            link,
        })
    }

    /// Load a config file, or the built-in tables when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to load {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_builtin_tables() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.tables, LookupContext::builtin());
        assert_eq!(config.link.param, "s");
    }

    #[test]
    fn test_from_json_with_param() {
        let config = Config::from_json(
            r#"{ "keys": ["C"], "modes": ["Ionian"], "instruments": ["harpsichord"],
                 "chords": [{ "name": "C", "notes": "C, E, G" }], "param": "state" }"#,
        )
        .unwrap();
        assert_eq!(config.tables.instruments, ["harpsichord"]);
        assert_eq!(config.link.param, "state");
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = Config::from_json(
            r#"{ "keys": ["C"], "modes": [], "instruments": ["x"], "chords": [] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("modes"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load(Some(Path::new("/nonexistent/tables.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tables.json"));
    }
}
