use std::path::PathBuf;
use thiserror::Error;

use crate::hierarchy::NodeId;

/// Core library errors
#[derive(Error, Debug)]
pub enum GroveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigator error: {0}")]
    Navigator(#[from] NavError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by the selection operations of the tree navigator.
///
/// These are programmer errors: the caller handed over a node the hierarchy
/// does not know about.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Invalid argument: node {0} is not part of the hierarchy")]
    InvalidArgument(NodeId),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GroveError>;
