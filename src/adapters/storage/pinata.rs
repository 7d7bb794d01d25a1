//! Pinata adapter - pins documents to IPFS through Pinata's pinning API.
//!
//! # Configuration
//!
//! ```ignore
//! let storage = PinataStorage::new(PinataConfig::new(jwt))?;
//! let cid = storage.upload(pdf_bytes, "contract.pdf").await?;
//! assert!(cid.as_str().starts_with("ipfs://"));
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::anchoring::ContentId;
use crate::ports::{ContentStorage, ExportFormat, StorageError};

pub const DEFAULT_PINATA_BASE_URL: &str = "https://api.pinata.cloud";

/// Configuration for the Pinata adapter.
#[derive(Debug, Clone)]
pub struct PinataConfig {
    jwt: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl PinataConfig {
    pub fn new(jwt: impl Into<String>) -> Self {
        Self {
            jwt: Secret::new(jwt.into()),
            base_url: DEFAULT_PINATA_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.jwt.expose_secret().trim())
    }
}

/// Content storage backed by Pinata.
pub struct PinataStorage {
    config: PinataConfig,
    client: Client,
}

impl PinataStorage {
    pub fn new(config: PinataConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn upload_form(bytes: Vec<u8>, filename: &str) -> Result<Form, StorageError> {
        let mime = filename
            .rsplit_once('.')
            .and_then(|(_, ext)| ExportFormat::from_extension(ext))
            .map(|format| format.content_type())
            .unwrap_or("application/octet-stream");

        let file = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|e| StorageError::invalid_response(format!("invalid mime type: {}", e)))?;

        let metadata = serde_json::json!({ "name": filename }).to_string();

        Ok(Form::new()
            .part("file", file)
            .text("pinataMetadata", metadata))
    }

    async fn check_status(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(map_error_status(status.as_u16(), detail))
    }
}

fn map_error_status(status: u16, detail: String) -> StorageError {
    match status {
        401 | 403 => StorageError::AuthenticationFailed,
        _ => StorageError::rejected(status, detail.trim()),
    }
}

fn map_transport_error(err: reqwest::Error) -> StorageError {
    if err.is_timeout() {
        StorageError::network(format!("request timed out: {}", err))
    } else {
        StorageError::network(err.to_string())
    }
}

/// Turns a `pinFileToIPFS` success body into a content id.
fn content_id_from(body: PinResponse) -> Result<ContentId, StorageError> {
    ContentId::from_hash(&body.ipfs_hash)
        .map_err(|e| StorageError::invalid_response(format!("bad IpfsHash: {}", e)))
}

#[async_trait]
impl ContentStorage for PinataStorage {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<ContentId, StorageError> {
        let size = bytes.len();
        let form = Self::upload_form(bytes, filename)?;

        let response = self
            .client
            .post(self.url("/pinning/pinFileToIPFS"))
            .header("Authorization", self.config.bearer())
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = Self::check_status(response).await?;

        let body: PinResponse = response
            .json()
            .await
            .map_err(|e| StorageError::invalid_response(e.to_string()))?;
        let cid = content_id_from(body)?;

        tracing::info!(cid = %cid, filename, size_bytes = size, "document pinned");
        Ok(cid)
    }

    async fn check_authentication(&self) -> Result<(), StorageError> {
        let response = self
            .client
            .get(self.url("/data/testAuthentication"))
            .header("Authorization", self.config.bearer())
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::check_status(response).await.map(|_| ())
    }
}

// ----- Pinata API Types -----

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}
