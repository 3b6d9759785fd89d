pub mod argon2;
pub mod errors;

pub use argon2::ensure_within_limit;
pub use argon2::PasswordHasher;
pub use argon2::MAX_PASSWORD_BYTES;
pub use errors::PasswordError;
