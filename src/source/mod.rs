/// Photo data source contract
///
/// This module handles:
/// - The `PhotoSource` port the gallery fetches pages through (this file)
/// - A local JSON catalog implementation of that port (catalog.rs)
///
/// Whether pages come from a file on disk or a remote paged API is
/// invisible to the gallery; any implementation just has to preserve the
/// photo schema and the page/has-next contract.

pub mod catalog;

pub use catalog::CatalogSource;

use crate::error::SourceError;
use crate::photo::Photo;

/// One page of photos from a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The photos on this page, in catalog order.
    pub photos: Vec<Photo>,
    /// Whether a further page exists after this one.
    pub has_next_page: bool,
}

/// Port for paged photo delivery.
///
/// `page` is 1-based. Implementations report delivery failures as
/// [`SourceError::Transport`] and missing single photos as
/// [`SourceError::NotFound`]; timeout policy belongs to the transport,
/// not to this contract. The returned futures are `Send` so a running
/// gallery can be spawned onto a tokio runtime.
pub trait PhotoSource {
    /// Fetch one page of photos.
    fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl std::future::Future<Output = Result<Page, SourceError>> + Send;

    /// Fetch a single photo by id, for the detail view.
    fn fetch_photo(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = Result<Photo, SourceError>> + Send;
}
