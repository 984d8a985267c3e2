//! Request-scoped API credential
//!
//! The key is parsed once per request and handed to the provider by
//! reference. It is wrapped in `secrecy` so it never reaches logs or
//! `Debug` output.

use crate::LlmError;
use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// Shortest key accepted as plausibly real
pub const MIN_KEY_LEN: usize = 8;

/// A validated API key
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Validate a raw credential
    ///
    /// Surrounding whitespace is ignored. Empty keys, keys with inner
    /// whitespace, and keys shorter than [`MIN_KEY_LEN`] are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use trove_llm::ApiKey;
    ///
    /// assert!(ApiKey::parse("sk-0123456789").is_ok());
    /// assert!(ApiKey::parse("").is_err());
    /// assert!(ApiKey::parse("sk 0123456789").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, LlmError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(LlmError::InvalidCredential("API key is missing".to_string()));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(LlmError::InvalidCredential(
                "API key contains whitespace".to_string(),
            ));
        }
        if key.len() < MIN_KEY_LEN {
            return Err(LlmError::InvalidCredential("API key is too short".to_string()));
        }
        Ok(Self(SecretBox::new(Box::from(key))))
    }

    /// Parse an optional credential, treating `None` as missing
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, LlmError> {
        Self::parse(raw.unwrap_or(""))
    }

    /// Expose the key for use in an outgoing request
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self(SecretBox::new(Box::from(self.expose())))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
