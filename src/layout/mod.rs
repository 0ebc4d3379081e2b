/// Masonry layout engine
///
/// This module handles:
/// - Deriving the column count from the available container width (columns.rs)
/// - Distributing photos into balanced columns (distribute.rs)
///
/// Both pieces are pure functions over their inputs; the gallery
/// orchestrator decides when to re-run them.

pub mod columns;
pub mod distribute;

pub use columns::resolve_column_count;
pub use distribute::{distribute, ColumnAssignment};
