use async_trait::async_trait;
use thiserror::Error;

use crate::identity::CredentialRecord;

/// Failure of the storage behind a [`CredentialLookup`].
///
/// "No such identifier" is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Credential lookup failed: {0}")]
pub struct LookupError(pub String);

/// Port through which the auth layer reads stored credentials.
///
/// Implemented by the owning service over its user storage. Implementations
/// perform a single lookup per call with no retries and no caching.
#[async_trait]
pub trait CredentialLookup: Send + Sync + 'static {
    /// Find the credential record for an identifier.
    ///
    /// # Arguments
    /// * `identifier` - Login key, compared case-sensitively
    ///
    /// # Returns
    /// The record, or None if no account uses this identifier
    ///
    /// # Errors
    /// * `LookupError` - Storage could not be queried
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CredentialRecord>, LookupError>;
}
