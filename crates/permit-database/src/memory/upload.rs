//! In-memory uploaded image store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use permit_core::store::StoreResult;
use permit_core::types::PermitId;
use permit_entity::UploadedImage;

use crate::store::UploadStore;

/// Uploaded images in insertion order.
#[derive(Debug, Default)]
pub struct MemoryUploadStore {
    images: RwLock<Vec<UploadedImage>>,
}

impl MemoryUploadStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an image.
    pub async fn record(&self, image: UploadedImage) {
        self.images.write().await.push(image);
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn list_for_permits(&self, permit_ids: &[PermitId]) -> StoreResult<Vec<UploadedImage>> {
        Ok(self
            .images
            .read()
            .await
            .iter()
            .filter(|i| permit_ids.contains(&i.permit_id))
            .cloned()
            .collect())
    }
}
