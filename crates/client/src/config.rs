use std::path::PathBuf;

use pidgen_core::lifecycle::IdPolicy;

use crate::error::ConfigError;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "https://projectidgeneration.azurewebsites.net/api";

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for the hosted backend. Override via
/// environment variables (or a `.env` file loaded by the binary).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Where the signed-in session is persisted.
    pub session_file: PathBuf,
    /// Which project identifier review endpoints are addressed by.
    pub id_policy: IdPolicy,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                  |
    /// |-------------------------------|------------------------------------------|
    /// | `PIDGEN_API_URL`              | hosted backend                           |
    /// | `PIDGEN_REQUEST_TIMEOUT_SECS` | `30`                                     |
    /// | `PIDGEN_SESSION_FILE`         | `<config dir>/pidgen/session.json`       |
    /// | `PIDGEN_ID_POLICY`            | `observed`                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("PIDGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let request_timeout_secs: u64 = match std::env::var("PIDGEN_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PIDGEN_REQUEST_TIMEOUT_SECS",
                message: format!("'{raw}' is not a valid number of seconds"),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let session_file = match std::env::var("PIDGEN_SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file()?,
        };

        let id_policy = match std::env::var("PIDGEN_ID_POLICY") {
            Ok(raw) => raw.parse().map_err(|message| ConfigError::Invalid {
                var: "PIDGEN_ID_POLICY",
                message,
            })?,
            Err(_) => IdPolicy::default(),
        };

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            request_timeout_secs,
            session_file,
            id_policy,
        })
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("pidgen").join("session.json"))
        .ok_or(ConfigError::NoConfigDir)
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_loses_trailing_slash() {
        assert_eq!(
            normalize_base_url(" http://localhost:5000/api/ "),
            "http://localhost:5000/api"
        );
    }

    #[test]
    fn test_with_api_url_overrides() {
        let config = ClientConfig {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: 30,
            session_file: PathBuf::from("/tmp/session.json"),
            id_policy: IdPolicy::Observed,
        }
        .with_api_url("http://127.0.0.1:9000/");
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
    }
}
