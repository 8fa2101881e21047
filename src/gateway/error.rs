//! Gateway error types

use thiserror::Error;

/// Responder failure with classification
///
/// Both kinds are recoverable: a failed call surfaces as a visible agent
/// message and the user may retry. There is no fatal error class.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The responder could not be reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unavailable, message)
    }

    /// The responder did not answer within the deadline
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Timeout, message)
    }
}

/// Failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Responder unreachable (future network backend: connection refused,
    /// DNS failure, 5xx)
    Unavailable,
    /// Call exceeded its deadline
    Timeout,
}
