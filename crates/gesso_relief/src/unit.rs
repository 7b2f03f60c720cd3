//! One resolved source file, as handed over by a resolver front-end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::{ClassDecl, Declaration};

/// Errors raised while loading a serialized unit
#[derive(Debug, Error)]
pub enum UnitLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolved syntax tree of one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    /// Path of the analyzed source file (not of the serialized unit)
    pub path: String,
    /// Full source text, used for rendering and suppression comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl ResolvedUnit {
    pub fn new(path: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            path: path.into(),
            source: None,
            declarations,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Decode a unit from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and decode a `*.unit.json` file
    pub fn from_path(path: &Path) -> Result<Self, UnitLoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| UnitLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| UnitLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// All top-level classes, in declaration order
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Class(class) => Some(class),
            _ => None,
        })
    }
}
