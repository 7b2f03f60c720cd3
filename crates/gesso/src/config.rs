//! Configuration file loading for gesso.
//!
//! Reads `gesso.config.json` from the current working directory, or from the
//! path given with `--config`. Also provides the JSON Schema for editor
//! autocompletion.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gesso_patina::{CatalogExtensions, Catalogs, Linter, RuleRegistry, RuleSelectionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "gesso.config.json";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Rules(#[from] RuleSelectionError),
}

/// Top-level gesso configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GessoConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Lint configuration.
    #[serde(default)]
    pub lint: LintConfig,
}

/// Built-in rule sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Every rule
    #[default]
    Recommended,
    /// Only the rules that report errors
    Essential,
}

/// Configuration for the `lint` command.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LintConfig {
    #[serde(default)]
    pub preset: Preset,

    /// Rule code to enabled flag, applied on top of the preset.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, bool>,

    /// Additions to the built-in catalogs.
    #[serde(default, skip_serializing_if = "CatalogExtensions::is_empty")]
    pub catalogs: CatalogExtensions,
}

impl LintConfig {
    /// Rule codes enabled by the preset and the `rules` map, in registry order.
    ///
    /// Unknown codes in the map are logged and ignored.
    pub fn enabled_codes(&self) -> Vec<&'static str> {
        let preset = match self.preset {
            Preset::Recommended => RuleRegistry::with_recommended(),
            Preset::Essential => RuleRegistry::with_essential(),
        };
        let all = RuleRegistry::with_recommended();

        for code in self.rules.keys() {
            if all.get(code).is_none() {
                tracing::warn!(rule = %code, "ignoring unknown rule in config");
            }
        }

        all.codes()
            .filter(|code| match self.rules.get(*code) {
                Some(enabled) => *enabled,
                None => preset.get(code).is_some(),
            })
            .collect()
    }

    /// Build a linter for this configuration
    pub fn build_linter(&self) -> Result<Linter, CliError> {
        let registry = RuleRegistry::select(&self.enabled_codes())?;
        let mut linter = Linter::with_registry(registry);
        if !self.catalogs.is_empty() {
            linter = linter.with_catalogs(Arc::new(Catalogs::extended(&self.catalogs)));
        }
        Ok(linter)
    }
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<GessoConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config from `explicit`, or `gesso.config.json` in the current
/// directory.
///
/// A missing default file yields the default config. Unreadable or invalid
/// files are logged and also yield the default config.
pub fn load_config(explicit: Option<&Path>) -> GessoConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = std::env::current_dir()
                .unwrap_or_default()
                .join(CONFIG_FILE_NAME);
            if !path.exists() {
                return GessoConfig::default();
            }
            path
        }
    };

    match read_config(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!("{e}; using default configuration");
            GessoConfig::default()
        }
    }
}

/// JSON Schema for `gesso.config.json`.
pub const GESSO_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Gesso Configuration",
  "description": "Configuration file for gesso - setup-time linter for composition-style components",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "lint": {
      "type": "object",
      "description": "Lint configuration",
      "properties": {
        "preset": {
          "type": "string",
          "enum": ["recommended", "essential"],
          "default": "recommended",
          "description": "Built-in rule set. \"essential\" contains only the rules that report errors."
        },
        "rules": {
          "type": "object",
          "description": "Enable (true) or disable (false) rules by code, on top of the preset",
          "propertyNames": {
            "enum": [
              "no-conditional-composition",
              "no-async-setup",
              "ensure-reactive-props",
              "controller-lifecycle",
              "no-logic-in-builder",
              "no-mutable-fields",
              "shallow-reactivity",
              "provide-inject-type-match"
            ]
          },
          "additionalProperties": { "type": "boolean" }
        },
        "catalogs": {
          "type": "object",
          "description": "Names added to the built-in catalogs",
          "properties": {
            "compositionPrimitives": { "type": "array", "items": { "type": "string" } },
            "disposablePrefixes": { "type": "array", "items": { "type": "string" } },
            "mutatingMethods": { "type": "array", "items": { "type": "string" } },
            "primitiveTypes": { "type": "array", "items": { "type": "string" } },
            "wrapperTypes": { "type": "array", "items": { "type": "string" } },
            "resourceKeywords": { "type": "array", "items": { "type": "string" } },
            "vocabulary": {
              "type": "object",
              "description": "Replaces the framework vocabulary (base class, setup method, value accessor, ...)"
            }
          },
          "additionalProperties": false
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GessoConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_is_recommended() {
        let config = GessoConfig::default();
        assert_eq!(config.lint.preset, Preset::Recommended);
        assert_eq!(config.lint.enabled_codes().len(), 8);
    }

    #[test]
    fn test_preset_and_overrides() {
        let config = parse(
            r#"{
                "lint": {
                    "preset": "essential",
                    "rules": { "no-async-setup": false, "no-mutable-fields": true, "bogus": true }
                }
            }"#,
        );
        assert_eq!(
            config.lint.enabled_codes(),
            vec!["no-conditional-composition", "ensure-reactive-props", "no-mutable-fields"]
        );
    }

    #[test]
    fn test_catalog_extensions() {
        let config = parse(r#"{ "lint": { "catalogs": { "compositionPrimitives": ["useStore"] } } }"#);
        let linter = config.lint.build_linter().unwrap();
        assert!(linter.catalogs().composition_primitives.contains("useStore"));
        assert!(linter.catalogs().composition_primitives.contains("state"));
    }

    #[test]
    fn test_invalid_preset_is_a_parse_error() {
        let result: Result<GessoConfig, _> = serde_json::from_str(r#"{ "lint": { "preset": "strict" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file_falls_back() {
        let config = load_config(Some(Path::new("/nonexistent/gesso.config.json")));
        assert!(config.lint.rules.is_empty());
        assert!(matches!(
            read_config(Path::new("/nonexistent/gesso.config.json")),
            Err(CliError::Read { .. })
        ));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(GESSO_CONFIG_SCHEMA).unwrap();
        assert_eq!(schema["title"], "Gesso Configuration");
    }
}
