//! Configuration loading and validation for the sealer.
//!
//! All values are read from environment variables at startup.

use std::fmt;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cbc_hmac::ContentEncryption;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Validated sealer configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64url (unpadded) composite content-encryption key. **Required.**
    pub cek: String,

    /// JOSE `enc` algorithm the key belongs to.
    #[serde(default = "default_content_encryption")]
    pub content_encryption: ContentEncryption,

    /// Associated data authenticated alongside the content.
    #[serde(default)]
    pub aad: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_content_encryption() -> ContentEncryption {
    ContentEncryption::A128CbcHs256
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build sealer configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealer configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decode the composite key.
    ///
    /// # Errors
    ///
    /// Returns an error if `CEK` is not valid base64url or its length does not
    /// match `CONTENT_ENCRYPTION`.
    pub fn key(&self) -> Result<Zeroizing<Vec<u8>>> {
        let key = Zeroizing::new(
            URL_SAFE_NO_PAD
                .decode(self.cek.trim())
                .context("CEK must be unpadded base64url")?,
        );
        if key.len() != self.content_encryption.key_len() {
            anyhow::bail!(
                "CEK is {} bytes but {} requires {}",
                key.len(),
                self.content_encryption,
                self.content_encryption.key_len()
            );
        }
        Ok(key)
    }

    fn validate(&self) -> Result<()> {
        if self.cek.trim().is_empty() {
            anyhow::bail!("CEK is required and must not be empty");
        }
        self.key().map(|_| ())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cek", &"[REDACTED]")
            .field("content_encryption", &self.content_encryption)
            .field("aad", &self.aad)
            .field("log_level", &self.log_level)
            .finish()
    }
}
