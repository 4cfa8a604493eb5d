//! Error types for document loading and type resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a Swagger document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid document: {message}")]
    InvalidDocument { message: String },
}

/// Errors while resolving a schema into a Go type.
///
/// Both kinds are terminal for the schema being resolved: the generator must
/// not emit code for a type it could not resolve.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve reference {reference}: {message}")]
    ReferenceResolution { reference: String, message: String },

    #[error("unresolvable: {types:?} (format {format:?})")]
    UnresolvableType {
        types: Vec<String>,
        format: Option<String>,
    },
}

impl ResolveError {
    pub(crate) fn reference(reference: &str, message: impl Into<String>) -> Self {
        Self::ReferenceResolution {
            reference: reference.to_string(),
            message: message.into(),
        }
    }
}
