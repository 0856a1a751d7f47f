use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the plugin's host-facing operations.
///
/// Icon expansion never produces these for a missing asset; that case is
/// rendered as empty output.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("cache namespace {namespace}: {reason}")]
    Cache { namespace: String, reason: String },

    #[error("template {template}: {reason}")]
    Template { template: String, reason: String },

    #[error("malformed registration record: {0}")]
    Record(String),

    #[error("invalid template pattern: {0}")]
    TemplatePattern(#[from] regex::Error),

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize cache row: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;
