use std::fmt;

/// Stored credentials for one account.
///
/// `identifier` is the unique login key (an email address). The password
/// hash stays inside the auth layer: it is redacted from `Debug` output and
/// dropped when the record becomes an [`Identity`].
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Opaque account id assigned by the persistence layer
    pub id: String,
    pub identifier: String,
    pub display_name: String,
    pub password_hash: String,
}

impl CredentialRecord {
    /// Strip the password hash, keeping who the account is.
    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            identifier: self.identifier,
            display_name: self.display_name,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("display_name", &self.display_name)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// An authenticated account.
///
/// Only produced by a successful password check or token resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub identifier: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            id: "42".to_string(),
            identifier: "a@example.com".to_string(),
            display_name: "Alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", record());
        assert!(rendered.contains("a@example.com"));
        assert!(!rendered.contains("argon2id"));
    }

    #[test]
    fn test_into_identity() {
        let identity = record().into_identity();
        assert_eq!(identity.id, "42");
        assert_eq!(identity.identifier, "a@example.com");
        assert_eq!(identity.display_name, "Alice");
    }
}
