//! Configuration module
//!
//! Settings are read from the process environment (optionally seeded from a
//! `.env` file) once at startup and handed to the client constructors
//! explicitly. Nothing in the crate reads the environment after that.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const HTTP_TIMEOUT_SECS: u64 = 30;
const SERVER_PORT: u16 = 4000;
const BOX_API_BASE_URL: &str = "https://api.box.com/2.0";

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                other
            )),
        }
    }
}

/// Credentials and endpoint for the AssureID service
///
/// The password is redacted from `Debug` output.
#[derive(Clone)]
pub struct AssureIdConfig {
    /// Base URL, e.g. `https://services.assureid.net`
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Subscription that must be active, also sent on instance creation
    pub subscription_id: String,
}

impl Debug for AssureIdConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AssureIdConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub assure_id: AssureIdConfig,
    pub box_api_base_url: String,
    /// Upper bound for every outbound HTTP call
    pub http_timeout_secs: u64,
    /// Write a status card to the file when an invocation fails
    pub error_cards_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} must be set", key))
        };

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a whole number of seconds"))?,
            None => HTTP_TIMEOUT_SECS,
        };

        let log_format = LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default())?;

        let assure_id = AssureIdConfig {
            endpoint: required("ASSURE_ID_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            username: required("ASSURE_ID_USERNAME")?,
            password: lookup("ASSURE_ID_PASSWORD")
                .ok_or_else(|| anyhow::anyhow!("ASSURE_ID_PASSWORD must be set"))?,
            subscription_id: required("ASSURE_ID_SUBSCRIPTION_ID")?,
        };

        let config = Config {
            server_port,
            environment,
            log_format,
            assure_id,
            box_api_base_url: lookup("BOX_API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| BOX_API_BASE_URL.to_string()),
            http_timeout_secs,
            error_cards_enabled: lookup("ERROR_CARDS_ENABLED")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !is_http_url(&self.assure_id.endpoint) {
            return Err(anyhow::anyhow!(
                "ASSURE_ID_ENDPOINT must be an http(s) URL, got '{}'",
                self.assure_id.endpoint
            ));
        }

        if !is_http_url(&self.box_api_base_url) {
            return Err(anyhow::anyhow!(
                "BOX_API_BASE_URL must be an http(s) URL, got '{}'",
                self.box_api_base_url
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP_TIMEOUT_SECS must be greater than zero"));
        }

        if self.is_production() && self.assure_id.endpoint.starts_with("http://") {
            return Err(anyhow::anyhow!(
                "ASSURE_ID_ENDPOINT must use https in production"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ASSURE_ID_ENDPOINT", "https://services.assureid.net/"),
            ("ASSURE_ID_USERNAME", "skill-user"),
            ("ASSURE_ID_PASSWORD", "s3cret"),
            ("ASSURE_ID_SUBSCRIPTION_ID", "sub-123"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();

        assert_eq!(config.server_port, 4000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.box_api_base_url, "https://api.box.com/2.0");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert!(config.error_cards_enabled);
        // Trailing slash is trimmed so paths can be appended
        assert_eq!(config.assure_id.endpoint, "https://services.assureid.net");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let vars: Vec<_> = required_vars()
            .into_iter()
            .filter(|(k, _)| *k != "ASSURE_ID_USERNAME")
            .collect();

        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("ASSURE_ID_USERNAME"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = required_vars();
        vars.extend([
            ("PORT", "8080"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("ERROR_CARDS_ENABLED", "false"),
            ("LOG_FORMAT", "json"),
            ("BOX_API_BASE_URL", "http://localhost:9000/2.0/"),
        ]);

        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.http_timeout_secs, 5);
        assert!(!config.error_cards_enabled);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.box_api_base_url, "http://localhost:9000/2.0");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut vars = required_vars();
        vars.push(("HTTP_TIMEOUT_SECS", "0"));

        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let mut vars = required_vars();
        vars.push(("LOG_FORMAT", "xml"));

        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_plain_http_endpoint_rejected_in_production() {
        let mut vars: Vec<_> = required_vars()
            .into_iter()
            .filter(|(k, _)| *k != "ASSURE_ID_ENDPOINT")
            .collect();
        vars.push(("ASSURE_ID_ENDPOINT", "http://assureid.internal"));
        vars.push(("ENVIRONMENT", "production"));

        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("https"));
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
