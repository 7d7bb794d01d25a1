//! Document storage configuration (Pinata)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::storage::DEFAULT_PINATA_BASE_URL;
use crate::application::handlers::DEFAULT_MAX_UPLOAD_BYTES;

/// Storage configuration. Without a JWT documents are kept in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Pinata JWT
    pub pinata_jwt: Option<Secret<String>>,

    /// Pinata API base URL
    #[serde(default = "default_pinata_base_url")]
    pub pinata_base_url: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl StorageConfig {
    /// The JWT, when one is set and not blank.
    pub fn jwt(&self) -> Option<&str> {
        self.pinata_jwt
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }

    pub fn has_pinata(&self) -> bool {
        self.jwt().is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.pinata_base_url.starts_with("https://")
            && !self.pinata_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidUrl("storage.pinata_base_url"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pinata_jwt: None,
            pinata_base_url: default_pinata_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_pinata_base_url() -> String {
    DEFAULT_PINATA_BASE_URL.to_string()
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}
