use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

// The signing key must never reach a log line.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Argon2 cost parameters. Defaults match the argon2 crate's defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    30
}

/// Keys shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime: one year.
pub const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".to_string(),
            ));
        }
        if self.jwt.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be at most {}",
                MAX_EXPIRATION_MINUTES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_minutes: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/blog".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 8000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_minutes,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config("a-secret-that-is-long-enough-for-hs256", 30)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        assert!(config("", 30).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiry() {
        assert!(config("secret", 0).validate().is_err());
    }

    #[test]
    fn test_validate_caps_expiry() {
        assert!(config("secret", MAX_EXPIRATION_MINUTES).validate().is_ok());
        assert!(config("secret", MAX_EXPIRATION_MINUTES + 1)
            .validate()
            .is_err());
        assert!(config("secret", 1_000_000_000_000).validate().is_err());
    }

    #[test]
    fn test_max_expiry_issues_a_token() {
        let handler = auth::JwtHandler::new(b"a-secret-that-is-long-enough-for-hs256");
        let identity = auth::Identity {
            id: "1".to_string(),
            identifier: "a@example.com".to_string(),
            display_name: "Alice".to_string(),
        };
        assert!(handler
            .issue(&identity, chrono::Duration::minutes(MAX_EXPIRATION_MINUTES))
            .is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", config("super-secret-value", 30));
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    fn test_password_defaults_build_a_hasher() {
        let password = PasswordConfig::default();
        assert!(auth::PasswordHasher::with_params(
            password.memory_kib,
            password.iterations,
            password.parallelism
        )
        .is_ok());
    }
}
