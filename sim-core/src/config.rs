//! Process-environment configuration.

use crate::error::{Result, SimError};

/// The four secrets the pipeline needs, read once at startup.
///
/// Every field is optional at load time; a missing value only surfaces as
/// [`SimError::Config`] when the stage that needs it runs. The struct is
/// built once in `main` and passed by reference into the pipeline — no
/// ambient environment lookups inside business logic.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tavily_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub sender_password: Option<String>,
}

impl Config {
    /// Read all secrets from the process environment.
    pub fn from_env() -> Self {
        Self {
            tavily_api_key: read_env("TAVILY_API_KEY"),
            gemini_api_key: read_env("GEMINI_API_KEY"),
            sender_email: read_env("CORREO_EMISOR"),
            sender_password: read_env("CORREO_PASS"),
        }
    }

    pub fn tavily_api_key(&self) -> Result<&str> {
        require(&self.tavily_api_key, "TAVILY_API_KEY")
    }

    pub fn gemini_api_key(&self) -> Result<&str> {
        require(&self.gemini_api_key, "GEMINI_API_KEY")
    }

    pub fn sender_email(&self) -> Result<&str> {
        require(&self.sender_email, "CORREO_EMISOR")
    }

    pub fn sender_password(&self) -> Result<&str> {
        require(&self.sender_password, "CORREO_PASS")
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| SimError::Config(format!("{name} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_errors_at_use() {
        let config = Config::default();
        let err = config.tavily_api_key().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: TAVILY_API_KEY is not set");
    }

    #[test]
    fn test_present_secret_is_returned() {
        let config = Config { gemini_api_key: Some("k".into()), ..Config::default() };
        assert_eq!(config.gemini_api_key().unwrap(), "k");
        assert!(config.sender_email().is_err());
    }
}
