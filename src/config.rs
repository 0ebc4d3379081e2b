/// Gallery design constants
///
/// All tunables for the layout engine and the incremental loader live
/// here so the embedding application configures the gallery in one place.

/// Configuration for a gallery instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryConfig {
    /// Minimum rendered width of a single column, in pixels.
    /// Drives how many columns fit into the available width.
    pub min_column_width: f32,
    /// Fixed lateral padding allowance subtracted from the container
    /// width before dividing it into columns.
    pub lateral_padding: f32,
    /// Upper bound on the column count regardless of width.
    pub max_columns: usize,
    /// Vertical gap between items within a column, in pixels.
    /// Also the gap preceding the first item of each column.
    pub gap: f32,
    /// Photos requested per page from the data source.
    pub page_size: u32,
    /// How far ahead of the viewport's bottom edge the sentinel may sit
    /// and still trigger a load, in pixels. Loading starts before the
    /// user actually reaches the bottom.
    pub lookahead_margin: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            min_column_width: 250.0,
            lateral_padding: 32.0,
            max_columns: 4,
            gap: 16.0,
            page_size: 80,
            lookahead_margin: 300.0,
        }
    }
}
