//! Datasource configuration
//!
//! ```yaml
//! encryption:
//!   enable: true
//!   salt: "${DATASOURCE_ENCRYPTION_SALT:-!@#$%}"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Salt used when none is configured
pub const DEFAULT_ENCRYPTION_SALT: &str = "!@#$%";

/// Matches `${VAR}` and `${VAR:-default}`
static ENV_VAR_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var regex pattern is invalid - this is a bug")
});

/// Top-level datasource settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    /// Password encryption at rest
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

/// Password encryption settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Encode stored passwords
    #[serde(default)]
    pub enable: bool,
    /// Salt prepended before the outer base64 pass
    #[serde(default = "default_salt")]
    pub salt: String,
}

fn default_salt() -> String {
    DEFAULT_ENCRYPTION_SALT.to_string()
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            enable: false,
            salt: default_salt(),
        }
    }
}

impl EncryptionConfig {
    /// Encryption enabled with the given salt
    pub fn enabled(salt: impl Into<String>) -> Self {
        Self {
            enable: true,
            salt: salt.into(),
        }
    }
}

impl DatasourceConfig {
    /// Parse YAML text, expanding environment variables first
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content);
        let config: Self = serde_yaml::from_str(&expanded)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.encryption.enable && self.encryption.salt.is_empty() {
            return Err(Error::config(
                "encryption.salt must not be empty when encryption is enabled",
            ));
        }
        Ok(())
    }
}

fn expand_env_vars(content: &str) -> String {
    ENV_VAR_REGEX
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str());

            std::env::var(var_name).unwrap_or_else(|_| default.unwrap_or("").to_string())
        })
        .to_string()
}
