//! Error types for logicwire
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using LogicError
pub type Result<T> = std::result::Result<T, LogicError>;

/// Unified error type for logicwire operations
#[derive(Debug, Error)]
pub enum LogicError {
    // -------------------------------------------------------------------------
    // Local Validation Errors
    // -------------------------------------------------------------------------
    /// A caller-supplied argument failed validation; nothing was sent.
    #[error("Invalid argument {param}: {value:?}")]
    Argument { param: String, value: String },

    /// A request field cannot be carried by the wire format.
    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The server answered NAK.
    #[error("Command failed: {raw:?}")]
    Command { raw: String },

    #[error("Invalid response ({reason}): {raw:?}")]
    InvalidResponse { reason: String, raw: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LogicError {
    pub(crate) fn argument(param: impl Into<String>, value: impl ToString) -> Self {
        LogicError::Argument {
            param: param.into(),
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_response(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        LogicError::InvalidResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}
