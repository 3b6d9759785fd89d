use thiserror::Error;

use crate::jwt::JwtError;
use crate::lookup::LookupError;
use crate::password::PasswordError;

/// Failure of an authentication or identity resolution call.
///
/// Callers at the HTTP boundary collapse all of these into one response;
/// the variants stay distinct so logs can tell them apart via [`AuthError::kind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    PasswordTooLong { max: usize, actual: usize },

    #[error("Invalid password hash: {0}")]
    InvalidHashFormat(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),

    #[error("Token subject no longer exists")]
    SubjectNotFound,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl AuthError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::PasswordTooLong { .. } => "password_too_long",
            AuthError::InvalidHashFormat(_) => "invalid_hash_format",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid(_) => "token_invalid",
            AuthError::SubjectNotFound => "subject_not_found",
            AuthError::Hashing(_) => "hashing",
            AuthError::TokenEncoding(_) => "token_encoding",
            AuthError::Lookup(_) => "lookup",
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooLong { max, actual } => AuthError::PasswordTooLong { max, actual },
            PasswordError::InvalidHashFormat(msg) => AuthError::InvalidHashFormat(msg),
            PasswordError::InvalidParameters(msg) | PasswordError::HashingFailed(msg) => {
                AuthError::Hashing(msg)
            }
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::InvalidToken(msg) => AuthError::TokenInvalid(msg),
            JwtError::MissingClaim(claim) => {
                AuthError::TokenInvalid(format!("missing claim {}", claim))
            }
            JwtError::EncodingFailed(msg) => AuthError::TokenEncoding(msg),
        }
    }
}
