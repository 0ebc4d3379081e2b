//! masonry-gallery: headless masonry photo gallery core
//!
//! Fetches photo metadata page by page from a pluggable data source,
//! lays the accumulated photos out in balanced columns, and coordinates
//! incremental loading from viewport events. It is UI-agnostic: a
//! presentation layer is expected to provide
//! - the container width (resize events)
//! - the scroll sentinel's distance from the viewport edge
//! - a once-per-frame tick
//!
//! and to render the [`ColumnAssignment`](layout::ColumnAssignment) the
//! gallery publishes back.

pub mod config;
pub mod error;
pub mod gallery;
pub mod layout;
pub mod photo;
pub mod source;

pub use config::GalleryConfig;
pub use error::SourceError;
pub use gallery::{
    FetchRequest, Gallery, GalleryEvent, GalleryHandle, GalleryRunner, GallerySnapshot,
};
pub use layout::{distribute, resolve_column_count, ColumnAssignment};
pub use photo::{Photo, PhotoSrc};
pub use source::{CatalogSource, Page, PhotoSource};
