//! In-memory content storage for tests and offline development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::anchoring::{ContentId, DocumentDigest};
use crate::ports::{ContentStorage, StorageError};

/// A pinned object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Content storage that keeps documents in a map keyed by a digest-derived id.
///
/// Uploading the same bytes twice yields the same content id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStorage {
    objects: Arc<RwLock<HashMap<ContentId, StoredObject>>>,
    failure: Option<StorageError>,
}

impl InMemoryContentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `error`.
    pub fn failing_with(error: StorageError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub async fn get(&self, cid: &ContentId) -> Option<StoredObject> {
        self.objects.read().await.get(cid).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    fn content_id_for(bytes: &[u8]) -> Result<ContentId, StorageError> {
        let digest = DocumentDigest::of(bytes);
        ContentId::from_hash(&format!("Qm{}", &digest.as_str()[..44]))
            .map_err(|e| StorageError::invalid_response(e.to_string()))
    }
}

#[async_trait]
impl ContentStorage for InMemoryContentStorage {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<ContentId, StorageError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let cid = Self::content_id_for(&bytes)?;
        self.objects.write().await.insert(
            cid.clone(),
            StoredObject {
                filename: filename.to_string(),
                bytes,
            },
        );
        Ok(cid)
    }

    async fn check_authentication(&self) -> Result<(), StorageError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
