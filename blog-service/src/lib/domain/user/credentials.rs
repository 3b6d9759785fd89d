use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialLookup;
use auth::CredentialRecord;
use auth::LookupError;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Exposes the user repository to the auth layer, keyed by email.
pub struct UserCredentialLookup<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserCredentialLookup<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> CredentialLookup for UserCredentialLookup<UR>
where
    UR: UserRepository,
{
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CredentialRecord>, LookupError> {
        // No stored account can carry an address that fails validation.
        let Ok(email) = EmailAddress::new(identifier.to_string()) else {
            return Ok(None);
        };

        self.repository
            .find_by_email(&email)
            .await
            .map(|user| user.map(credential_record))
            .map_err(|e| LookupError(e.to_string()))
    }
}

fn credential_record(user: User) -> CredentialRecord {
    CredentialRecord {
        id: user.id.to_string(),
        identifier: user.email.as_str().to_string(),
        display_name: user.name.as_str().to_string(),
        password_hash: user.password_hash,
    }
}

/// Map an authenticated identity back to its user id.
pub fn user_id_of(identity: &auth::Identity) -> Option<UserId> {
    UserId::from_string(&identity.id).ok()
}
