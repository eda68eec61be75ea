//! Configuration file handling
//!
//! Values come from `config.toml` in the platform config directory, with
//! CLI flags taking precedence. Every field has a default so the tool runs
//! against a local backend with no file at all.

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Backend target settings
    #[serde(default)]
    pub target: Target,

    /// Teacher account credentials
    #[serde(default)]
    pub credentials: Credentials,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Backend target settings
#[derive(Debug, Deserialize, Clone)]
pub struct Target {
    /// Base URL of the portal API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

/// Teacher account credentials used by the login step
#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
        }
    }
}

fn default_email() -> String {
    "docente@test.com".to_string()
}

fn default_password() -> String {
    "Test123!".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Per-request timeout applied at the HTTP client boundary
    #[serde(default = "default_request")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
        }
    }
}

fn default_request() -> u64 {
    15
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply CLI flag overrides on top of the file values
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        email: Option<String>,
        password: Option<String>,
        timeout: Option<u64>,
    ) {
        if let Some(base_url) = base_url {
            self.target.base_url = base_url;
        }
        if let Some(email) = email {
            self.credentials.email = email;
        }
        if let Some(password) = password {
            self.credentials.password = password;
        }
        if let Some(timeout) = timeout {
            self.timeouts.request_secs = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.target.base_url, "http://localhost:3001/api");
        assert_eq!(config.credentials.email, "docente@test.com");
        assert_eq!(config.timeouts.request_secs, 15);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[target]\nbase_url = \"https://staging.example.net/api\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.target.base_url, "https://staging.example.net/api");
        // untouched sections fall back to defaults
        assert_eq!(config.credentials.password, "Test123!");
        assert_eq!(config.timeouts.request_secs, 15);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();

        let err = Config::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(
            Some("http://10.0.0.5/api".to_string()),
            None,
            Some("hunter2".to_string()),
            Some(30),
        );
        assert_eq!(config.target.base_url, "http://10.0.0.5/api");
        assert_eq!(config.credentials.email, "docente@test.com");
        assert_eq!(config.credentials.password, "hunter2");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
