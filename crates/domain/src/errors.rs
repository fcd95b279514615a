//! Error taxonomy for the check-cycle domain.
//!
//! Only [`ConfigurationError`] is fatal, and only at startup. Every other
//! family is terminal for its own call: the engine logs it and substitutes a
//! neutral value (empty fetch result, unavailable translation, skipped send).
//! Nothing is retried.

use thiserror::Error;

/// The process configuration is missing or invalid.
///
/// Produced at load time; no cycle ever runs with an invalid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required variable is absent or empty.
    #[error("Missing required configuration: {name}")]
    Missing {
        /// Name of the environment variable.
        name: &'static str,
    },

    /// A variable is present but its value cannot be used.
    #[error("Invalid value for {name}: {message}")]
    Invalid {
        name: &'static str,
        message: String,
    },
}

/// A source-API read failed.
///
/// Treated by the engine as an empty result for that call; the corresponding
/// watermark category does not advance.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be sent or the response could not be read.
    #[error("Source API transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Source API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Source API response could not be decoded: {0}")]
    Decode(String),

    /// The repository identifier is not of the form `owner/name`.
    #[error("Invalid repository identifier: {0}")]
    InvalidRepository(String),
}

/// A notification could not be delivered to a destination.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery transport error: {0}")]
    Transport(String),

    #[error("Destination returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// The translation backend failed.
///
/// Never escapes the translation boundary in the engine.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation transport error: {0}")]
    Transport(String),

    #[error("Translation backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Translation response could not be decoded: {0}")]
    Decode(String),

    #[error("Translation backend returned no translations")]
    EmptyResponse,
}

/// The watermark state could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No persisted state exists yet (first run).
    #[error("No persisted watermark state at {0}")]
    NotFound(String),

    #[error("Watermark state I/O error: {0}")]
    Io(String),

    #[error("Watermark state is malformed: {0}")]
    Malformed(String),
}
