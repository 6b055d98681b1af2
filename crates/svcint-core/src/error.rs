//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout svcint. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation failures are a value ([`InvalidResource`]) listing every
//!   violation, never a single first-failure message.
//! - Defaulting and conversion are total and have no error type.
//! - Loading errors carry the path of the offending document and a reason.

use thiserror::Error;

use crate::field::InvalidResource;

/// Top-level error type for svcint.
#[derive(Error, Debug)]
pub enum SvcintError {
    /// The resource failed validation.
    #[error(transparent)]
    Invalid(#[from] InvalidResource),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
