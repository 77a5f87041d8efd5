//! Session cookie configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_LIFETIME_SECS: u64 = 60;
const MAX_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;
const MIN_SECRET_LEN: usize = 32;

/// Visitor session settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds, refreshed on every write
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: u64,

    /// Key used to sign the session cookie
    #[serde(default = "default_secret")]
    pub secret: SecretString,
}

impl SessionConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if !(MIN_LIFETIME_SECS..=MAX_LIFETIME_SECS).contains(&self.lifetime_secs) {
            return Err(ValidationError::InvalidSessionLifetime);
        }
        let name_ok = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !name_ok {
            return Err(ValidationError::InvalidCookieName);
        }
        if *environment == Environment::Production
            && self.secret.expose_secret().len() < MIN_SECRET_LEN
        {
            return Err(ValidationError::WeakSessionSecret);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            lifetime_secs: default_lifetime(),
            secret: default_secret(),
        }
    }
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_lifetime() -> u64 {
    24 * 60 * 60
}

fn default_secret() -> SecretString {
    SecretString::new("development-only-session-secret".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "session");
        assert_eq!(config.lifetime(), Duration::from_secs(86_400));
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_lifetime_bounds() {
        for secs in [0, 59, MAX_LIFETIME_SECS + 1] {
            let config = SessionConfig {
                lifetime_secs: secs,
                ..Default::default()
            };
            assert!(config.validate(&Environment::Development).is_err(), "{secs}");
        }
    }

    #[test]
    fn test_cookie_name_must_be_a_token() {
        let config = SessionConfig {
            cookie_name: "my session".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidCookieName)
        ));
    }

    #[test]
    fn test_production_requires_long_secret() {
        let config = SessionConfig {
            secret: SecretString::new("short".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakSessionSecret)
        ));
    }
}
