use std::sync::Arc;

use crate::errors::AuthError;
use crate::identity::CredentialRecord;
use crate::identity::Identity;
use crate::jwt::JwtHandler;
use crate::lookup::CredentialLookup;

/// Turns a bearer token into the current identity.
///
/// The subject is re-read from storage on every call, so an account deleted
/// after its token was issued stops resolving immediately. Nothing is cached.
pub struct IdentityResolver {
    lookup: Arc<dyn CredentialLookup>,
    jwt_handler: Arc<JwtHandler>,
}

impl IdentityResolver {
    pub fn new(lookup: Arc<dyn CredentialLookup>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            lookup,
            jwt_handler,
        }
    }

    /// Resolve a bearer token.
    ///
    /// # Arguments
    /// * `token` - Raw JWT, without the `Bearer ` prefix
    ///
    /// # Returns
    /// Identity of the token's subject
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Bad signature, malformed token, or no subject
    /// * `SubjectNotFound` - Subject no longer exists in storage
    /// * `Lookup` - Credential storage failed
    pub async fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.jwt_handler.decode(token)?;

        let subject = claims
            .sub
            .ok_or_else(|| AuthError::TokenInvalid("missing subject".to_string()))?;

        self.lookup
            .find_by_identifier(&subject)
            .await?
            .map(CredentialRecord::into_identity)
            .ok_or(AuthError::SubjectNotFound)
    }
}
