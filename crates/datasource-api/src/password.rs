//! Password encoding for persisted connection parameters
//!
//! With encryption enabled a password is stored as
//! `base64(salt + base64(password))`. With it disabled the password is
//! stored unchanged, which keeps records written before encryption was
//! switched on readable.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::EncryptionConfig;
use crate::error::{Error, Result};

/// Encodes and decodes stored datasource passwords
#[derive(Clone, Default, PartialEq)]
pub struct PasswordCodec {
    config: EncryptionConfig,
}

impl std::fmt::Debug for PasswordCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCodec")
            .field("enable", &self.config.enable)
            .field("salt", &"***")
            .finish()
    }
}

impl PasswordCodec {
    /// Create a codec from encryption settings
    pub fn new(config: EncryptionConfig) -> Self {
        Self { config }
    }

    /// Codec that stores passwords unchanged
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether passwords are transformed
    pub fn is_enabled(&self) -> bool {
        self.config.enable
    }

    /// Encode a plaintext password for storage
    pub fn encode(&self, password: &str) -> String {
        if password.is_empty() {
            return String::new();
        }
        if !self.config.enable {
            return password.to_string();
        }
        let salted = format!("{}{}", self.config.salt, STANDARD.encode(password));
        STANDARD.encode(salted)
    }

    /// Decode a stored password
    ///
    /// A stored value that does not carry the configured salt is returned
    /// unchanged.
    pub fn decode(&self, password: &str) -> Result<String> {
        if password.is_empty() {
            return Ok(String::new());
        }
        if !self.config.enable {
            return Ok(password.to_string());
        }

        let salted = decode_utf8(password)?;
        match salted.strip_prefix(self.config.salt.as_str()) {
            Some(inner) => decode_utf8(inner),
            None => {
                tracing::warn!("Stored datasource password does not match the configured salt");
                Ok(password.to_string())
            }
        }
    }
}

fn decode_utf8(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::authentication(format!("stored password is not valid base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::authentication(format!("stored password is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENCRYPTION_SALT;

    #[test]
    fn test_disabled_passthrough() {
        let codec = PasswordCodec::disabled();
        assert_eq!(codec.encode("123456"), "123456");
        assert_eq!(codec.decode("123456").unwrap(), "123456");
    }

    #[test]
    fn test_empty_password() {
        let codec = PasswordCodec::new(EncryptionConfig::enabled(DEFAULT_ENCRYPTION_SALT));
        assert_eq!(codec.encode(""), "");
        assert_eq!(codec.decode("").unwrap(), "");
    }

    #[test]
    fn test_enabled_round_trip() {
        let codec = PasswordCodec::new(EncryptionConfig::enabled(DEFAULT_ENCRYPTION_SALT));
        let encoded = codec.encode("123456");

        assert_ne!(encoded, "123456");
        assert_eq!(encoded, "IUAjJCVNVEl6TkRVMg==");
        assert_eq!(codec.decode(&encoded).unwrap(), "123456");
    }

    #[test]
    fn test_salt_mismatch_returns_input() {
        let writer = PasswordCodec::new(EncryptionConfig::enabled("salt-a"));
        let reader = PasswordCodec::new(EncryptionConfig::enabled("salt-b"));

        let encoded = writer.encode("secret");
        assert_eq!(reader.decode(&encoded).unwrap(), encoded);
    }

    #[test]
    fn test_invalid_base64() {
        let codec = PasswordCodec::new(EncryptionConfig::enabled(DEFAULT_ENCRYPTION_SALT));
        let err = codec.decode("not base64 !!").unwrap_err();
        assert_eq!(
            err.category(),
            crate::error::ErrorCategory::Authentication
        );
    }

    #[test]
    fn test_debug_hides_salt() {
        let codec = PasswordCodec::new(EncryptionConfig::enabled("pepper"));
        assert!(!format!("{:?}", codec).contains("pepper"));
    }
}
