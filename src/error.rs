//! Error handling for the results pipeline.
//!
//! Load failures (`SourceUnavailable`, `SchemaMismatch`) are fatal for the
//! session; `UnknownClassScheme` only fails the call that asked for it.
//! "Nothing found" outcomes are empty tables, never errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Source unavailable: {path} - {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Schema mismatch in {origin}: no column found for '{column}'")]
    SchemaMismatch { origin: String, column: String },

    #[error("Malformed source {origin}: {reason}")]
    MalformedSource { origin: String, reason: String },

    #[error("Unknown weight class scheme: federation '{federation}', sex '{sex}'")]
    UnknownClassScheme { federation: String, sex: String },

    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("No dataset found in: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LiftError {
    pub(crate) fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LiftError>;
