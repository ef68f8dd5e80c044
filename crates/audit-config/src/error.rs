//! Error types for audit-config.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while locating or reading an audit configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file exists at any of the searched locations.
    ///
    /// Recoverable: callers usually fall back to [`AuditConfig::default`](crate::AuditConfig).
    #[error("no audit configuration found (searched {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The document is not valid TOML.
    #[error("{}:{line}:{column}: {message}", display_origin(.path.as_deref()))]
    ParseError {
        path: Option<PathBuf>,
        line: usize,
        column: usize,
        message: String,
    },

    /// A known key holds a value of the wrong type or outside its accepted set.
    #[error(
        "{}:{line}:{column}: invalid value {found} for `{key}`, expected {expected}",
        display_origin(.path.as_deref())
    )]
    InvalidValue {
        path: Option<PathBuf>,
        key: String,
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A string that is not one of an enumeration's accepted keywords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown keyword `{0}`")]
pub struct UnknownKeyword(pub String);

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }

    /// The dotted key an `InvalidValue` refers to.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Attach the file a document-level error came from.
    pub(crate) fn with_path(mut self, origin: &Path) -> Self {
        match &mut self {
            ConfigError::ParseError { path, .. } | ConfigError::InvalidValue { path, .. } => {
                *path = Some(origin.to_path_buf());
            }
            _ => {}
        }
        self
    }
}

impl From<toml_parser::SyntaxError> for ConfigError {
    fn from(e: toml_parser::SyntaxError) -> Self {
        ConfigError::ParseError {
            path: None,
            line: e.location.line,
            column: e.location.column,
            message: e.message,
        }
    }
}

fn display_origin(path: Option<&Path>) -> String {
    path.map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
