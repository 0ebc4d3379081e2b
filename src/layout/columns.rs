/// Responsive column count derivation
///
/// Maps an available container width to an integer column count using
/// the configured minimum column width and column cap. The result is
/// always at least 1, so downstream layout code never sees zero columns.

use crate::config::GalleryConfig;

/// Derive the column count for a container of the given width.
///
/// `columns = clamp(floor((width - lateral_padding) / min_column_width), 1, max_columns)`
///
/// A width of zero (or one too small to fit a single column after the
/// padding allowance) still yields one column: the gallery degrades to a
/// single stack rather than disappearing.
pub fn resolve_column_count(width: f32, config: &GalleryConfig) -> usize {
    let usable = width - config.lateral_padding;
    if usable < config.min_column_width {
        return 1;
    }
    let fit = (usable / config.min_column_width).floor() as usize;
    fit.clamp(1, config.max_columns.max(1))
}

/// Pixel width of a single column once the count is known.
///
/// Splits the usable width evenly, accounting for the inter-column gaps.
/// Clamped to a small positive value so degenerate container widths can
/// never produce a zero or negative column width.
pub fn column_width(width: f32, count: usize, config: &GalleryConfig) -> f32 {
    let count = count.max(1);
    let gaps = config.gap * (count - 1) as f32;
    let usable = width - config.lateral_padding - gaps;
    (usable / count as f32).max(1.0)
}
