/// Local JSON catalog source
///
/// Serves pages out of a JSON file containing the full photo catalog as
/// an array of photo records. Useful for demos, offline galleries, and
/// as the reference implementation of the `PhotoSource` contract.

use std::path::Path;

use log::debug;

use super::{Page, PhotoSource};
use crate::error::SourceError;
use crate::photo::Photo;

/// A photo source backed by an in-memory catalog, typically loaded from
/// a JSON file at startup. Paging is a slice over the catalog order.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    photos: Vec<Photo>,
}

impl CatalogSource {
    /// Build a source over an already-loaded catalog.
    pub fn new(photos: Vec<Photo>) -> Self {
        Self { photos }
    }

    /// Load a catalog from a JSON file (an array of photo records).
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let photos: Vec<Photo> = serde_json::from_slice(&bytes)?;
        debug!(
            "loaded catalog with {} photos from {}",
            photos.len(),
            path.as_ref().display()
        );
        Ok(Self::new(photos))
    }

    /// Total number of photos in the catalog.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl PhotoSource for CatalogSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page, SourceError> {
        if page == 0 || page_size == 0 {
            return Err(SourceError::Transport(format!(
                "invalid page request: page {page}, page_size {page_size}"
            )));
        }

        let start = (page as usize - 1) * page_size as usize;
        let end = (start + page_size as usize).min(self.photos.len());

        let photos = if start < self.photos.len() {
            self.photos[start..end].to_vec()
        } else {
            Vec::new()
        };

        Ok(Page {
            photos,
            has_next_page: end < self.photos.len(),
        })
    }

    async fn fetch_photo(&self, id: u64) -> Result<Photo, SourceError> {
        self.photos
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(SourceError::NotFound(id))
    }
}
