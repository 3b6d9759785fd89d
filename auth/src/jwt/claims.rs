use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::errors::JwtError;

/// Access token claims.
///
/// Carries the subject identifier and the validity window. Tokens are
/// stateless: nothing about an issued claim set is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential identifier, i.e. the email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject valid for `ttl` from `now`.
    ///
    /// # Arguments
    /// * `subject` - Credential identifier
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("token lifetime out of range".to_string()))?;

        Ok(Self {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Get the subject if present.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
