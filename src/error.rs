//! Error handling for identifier decoding operations.
//!
//! Structural violations of the 36-digit identifier or the 12-digit geo-code
//! are real errors. Unknown codes and extraction misses are ordinary values
//! and never show up here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("Invalid identifier '{input}': {violation}")]
    InvalidIdentifier {
        input: String,
        violation: FormatViolation,
    },

    #[error("Invalid geo-code '{input}': {violation}")]
    InvalidGeoCode {
        input: String,
        violation: FormatViolation,
    },

    #[error("Empty batch: the {what} list must contain at least one item")]
    EmptyBatch { what: String },

    #[error("No identifier column found in sheet '{sheet}'; specify the ID column explicitly")]
    IdColumnNotFound { sheet: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to read sheet {path}: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Processing failed: {reason}")]
    ProcessingFailed { reason: String },
}

/// The specific structural rule an input broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatViolation {
    #[error("input is empty")]
    Empty,

    #[error("expected {expected} characters, found {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// `position` is 1-based.
    #[error("non-digit character '{character}' at position {position}")]
    NonDigit { position: usize, character: char },

    #[error("time segment '{time_code}' is not a valid YYYYMMDDHHMMSS timestamp")]
    InvalidTimestamp { time_code: String },
}

impl DecoderError {
    pub fn invalid_identifier(input: impl Into<String>, violation: FormatViolation) -> Self {
        Self::InvalidIdentifier {
            input: input.into(),
            violation,
        }
    }

    pub fn invalid_geo_code(input: impl Into<String>, violation: FormatViolation) -> Self {
        Self::InvalidGeoCode {
            input: input.into(),
            violation,
        }
    }

    pub fn empty_batch(what: impl Into<String>) -> Self {
        Self::EmptyBatch { what: what.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for the structural errors raised by a single decode or geo parse
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. } | Self::InvalidGeoCode { .. }
        )
    }

    /// The rule that was broken, for format errors
    pub fn violation(&self) -> Option<&FormatViolation> {
        match self {
            Self::InvalidIdentifier { violation, .. } | Self::InvalidGeoCode { violation, .. } => {
                Some(violation)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecoderError>;
