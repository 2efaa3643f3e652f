//! Error types for token issuance and validation.

use thiserror::Error;

/// Errors that can occur while building, parsing or validating a token.
///
/// Validation stops at the first failing stage; the variant names that stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was supplied.
    #[error("Token required")]
    TokenRequired,

    /// The token is not a well-formed compact JWT.
    #[error("Token parse error: {0}")]
    Parse(String),

    /// The id carried by the token does not name a known party.
    #[error("Party not found: {app_id}")]
    PartyNotFound { app_id: String },

    /// The signature does not match the claimed party's secret.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token is older than the claimed party's TTL.
    #[error("Time limit exceeded")]
    TimeLimitExceeded,

    /// The token was issued in the future.
    #[error("Issued at (iat) timestamp cannot be in the future")]
    IssuedAtInFuture,

    /// The token's `exp` has passed.
    #[error("Token has expired")]
    Expired,

    /// The token's `nbf` has not been reached.
    #[error("Token can only be used after (nbf)")]
    NotYetUsable,

    /// The `aud` claim is not the expected audience.
    #[error("Invalid audience (aud)")]
    InvalidAudience,

    /// The `jti` does not match the resolved party's app id.
    #[error("Invalid id (jti)")]
    InvalidId,

    /// The local identity is incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless discriminant of [`TokenError`], for branching on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TokenRequired,
    ParseError,
    PartyNotFound,
    InvalidSignature,
    TimeLimitExceeded,
    IssuedAtInFuture,
    Expired,
    NotYetUsable,
    InvalidAudience,
    InvalidId,
    ConfigurationError,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TokenRequired => ErrorKind::TokenRequired,
            Self::Parse(_) => ErrorKind::ParseError,
            Self::PartyNotFound { .. } => ErrorKind::PartyNotFound,
            Self::InvalidSignature => ErrorKind::InvalidSignature,
            Self::TimeLimitExceeded => ErrorKind::TimeLimitExceeded,
            Self::IssuedAtInFuture => ErrorKind::IssuedAtInFuture,
            Self::Expired => ErrorKind::Expired,
            Self::NotYetUsable => ErrorKind::NotYetUsable,
            Self::InvalidAudience => ErrorKind::InvalidAudience,
            Self::InvalidId => ErrorKind::InvalidId,
            Self::Configuration(_) => ErrorKind::ConfigurationError,
        }
    }

    pub(crate) fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }
}
