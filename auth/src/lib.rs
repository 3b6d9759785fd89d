//! Authentication library
//!
//! Provides the password and session-token layer used by the blog service:
//! - Password hashing (Argon2id, 72-byte input cap)
//! - Password authentication against a [`CredentialLookup`] port
//! - JWT access token issuance and verification (HS256)
//! - Bearer token to [`Identity`] resolution
//!
//! The owning service implements [`CredentialLookup`] over its user storage;
//! everything else here is storage-agnostic.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Identity, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let identity = Identity {
//!     id: "1".to_string(),
//!     identifier: "a@example.com".to_string(),
//!     display_name: "Alice".to_string(),
//! };
//! let token = handler.issue(&identity, Duration::minutes(30)).unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert_eq!(claims.subject(), Some("a@example.com"));
//! ```

pub mod authenticator;
pub mod errors;
pub mod identity;
pub mod jwt;
pub mod lookup;
pub mod password;
pub mod resolver;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use errors::AuthError;
pub use identity::CredentialRecord;
pub use identity::Identity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use lookup::CredentialLookup;
pub use lookup::LookupError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
pub use resolver::IdentityResolver;
