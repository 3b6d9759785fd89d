use std::sync::Arc;

use crate::errors::AuthError;
use crate::identity::Identity;
use crate::lookup::CredentialLookup;
use crate::password::ensure_within_limit;
use crate::password::PasswordHasher;

/// Password authentication: credential lookup plus hash verification.
///
/// Stateless; safe to share behind an `Arc` across request handlers.
pub struct Authenticator {
    lookup: Arc<dyn CredentialLookup>,
    password_hasher: PasswordHasher,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `lookup` - Source of stored credentials
    /// * `password_hasher` - Hasher configured with the deployment's cost
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(lookup: Arc<dyn CredentialLookup>, password_hasher: PasswordHasher) -> Self {
        Self {
            lookup,
            password_hasher,
        }
    }

    /// Verify an identifier and password pair.
    ///
    /// An unknown identifier and a wrong password fail identically.
    ///
    /// # Arguments
    /// * `identifier` - Login key (email)
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The authenticated identity
    ///
    /// # Errors
    /// * `PasswordTooLong` - Password exceeds the hasher's byte limit
    /// * `InvalidCredentials` - No such identifier, or password does not match
    /// * `InvalidHashFormat` - Stored hash is malformed
    /// * `Lookup` - Credential storage failed
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        ensure_within_limit(password)?;

        let Some(record) = self.lookup.find_by_identifier(identifier).await? else {
            tracing::debug!("Authentication rejected: unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        let is_valid = self
            .password_hasher
            .verify_async(password, &record.password_hash)
            .await?;

        if !is_valid {
            tracing::debug!(account_id = %record.id, "Authentication rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(record.into_identity())
    }
}
