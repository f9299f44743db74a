use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};
use reqwest::Url;
use thiserror::Error;

pub const DEVELOPMENT_API_BASE: &str = "http://localhost:8000/api";
/// Both hosts have served production traffic. Neither is assumed; a
/// production deployment has to name its API base explicitly.
pub const KNOWN_PRODUCTION_HOSTS: [&str; 2] = [
    "https://api.bersekolah.com/api",
    "https://sandybrown-capybara-903436.hostingersite.com/api",
];
pub const AUTH_TOKEN_KEY: &str = "bersekolah_auth_token";

const DEFAULT_SESSION_DB: &str = "bersekolah.redb";
const DEFAULT_TOAST_MS: u64 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error(
        "BERSEKOLAH_API_BASE_URL must be set in production (known hosts: {})",
        KNOWN_PRODUCTION_HOSTS.join(", ")
    )]
    MissingProductionHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    /// Base of every REST path, without a trailing slash.
    pub api_base_url: String,
    /// Placeholder rows on list fetch failure. Never set in production.
    pub mock_fallback: bool,
    pub session_db: PathBuf,
    pub toast_duration: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("BERSEKOLAH_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("development") | Some("dev") => Environment::Development,
            None => {
                info!("BERSEKOLAH_ENV not set, using default: development");
                Environment::Development
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "BERSEKOLAH_ENV",
                    reason: format!("unknown environment {other}"),
                })
            }
        };

        let api_base_url = match environment {
            Environment::Production => lookup("BERSEKOLAH_API_BASE_URL")
                .ok_or(ConfigError::MissingProductionHost)?,
            Environment::Development => lookup("PUBLIC_API_BASE_URL").unwrap_or_else(|| {
                info!("PUBLIC_API_BASE_URL not set, using default: {DEVELOPMENT_API_BASE}");
                DEVELOPMENT_API_BASE.to_string()
            }),
        };
        let api_base_url = validate_base(&api_base_url)?;

        let mock_requested = lookup("BERSEKOLAH_MOCK_FALLBACK")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let mock_fallback = match environment {
            Environment::Production if mock_requested => {
                warn!("BERSEKOLAH_MOCK_FALLBACK ignored in production");
                false
            }
            _ => mock_requested,
        };

        let session_db = lookup("BERSEKOLAH_SESSION_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DB));

        let toast_ms = match lookup("BERSEKOLAH_TOAST_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "BERSEKOLAH_TOAST_MS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TOAST_MS,
        };

        Ok(Self {
            environment,
            api_base_url,
            mock_fallback,
            session_db,
            toast_duration: Duration::from_millis(toast_ms),
        })
    }

    pub fn development(api_base_url: &str) -> Self {
        Self {
            environment: Environment::Development,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            mock_fallback: false,
            session_db: PathBuf::from(DEFAULT_SESSION_DB),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn validate_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        key: "api base url",
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_local_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api_base_url, DEVELOPMENT_API_BASE);
        assert!(!config.mock_fallback);
        assert_eq!(config.toast_duration, Duration::from_millis(5000));
    }

    #[test]
    fn production_requires_explicit_host() {
        let err = load(&[("BERSEKOLAH_ENV", "production")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingProductionHost));
        assert!(err.to_string().contains("api.bersekolah.com"));
    }

    #[test]
    fn production_never_enables_mock_fallback() {
        let config = load(&[
            ("BERSEKOLAH_ENV", "production"),
            ("BERSEKOLAH_API_BASE_URL", "https://api.bersekolah.com/api/"),
            ("BERSEKOLAH_MOCK_FALLBACK", "1"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert!(!config.mock_fallback);
        assert_eq!(config.api_base_url, "https://api.bersekolah.com/api");
    }

    #[test]
    fn development_honours_mock_fallback() {
        let config = load(&[("BERSEKOLAH_MOCK_FALLBACK", "true")]).unwrap();
        assert!(config.mock_fallback);
    }

    #[test]
    fn rejects_garbage() {
        assert!(load(&[("PUBLIC_API_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("BERSEKOLAH_TOAST_MS", "soon")]).is_err());
        assert!(load(&[("BERSEKOLAH_ENV", "staging")]).is_err());
    }
}
