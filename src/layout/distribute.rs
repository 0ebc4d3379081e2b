/// Greedy balanced-column distribution
///
/// Assigns an ordered photo collection to N columns so the rendered
/// column heights stay close to each other. This is the classic greedy
/// load-balancing heuristic (shortest column wins), run over the photos
/// in input order rather than sorted by size, because visual reading
/// order matters more than optimal balance. O(photos × columns).

use log::warn;

use crate::photo::Photo;

/// Aspect ratio substituted for photos with degenerate geometry.
const FALLBACK_ASPECT_RATIO: f32 = 1.0;

/// Smallest rendered height ever added to a column accumulator.
/// Keeps NaN/infinite heights (from nonsensical column widths or photo
/// dimensions) out of the running totals.
const MIN_RENDERED_HEIGHT: f32 = 1.0;

/// The result of distributing a photo collection into columns.
///
/// Recomputed wholesale on every relevant input change, never patched
/// incrementally. The disjoint union of the column contents is exactly
/// the input collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    /// Photos per column, in assignment order within each column.
    pub columns: Vec<Vec<Photo>>,
    /// Final accumulated rendered height of each column, including gaps.
    pub heights: Vec<f32>,
    /// The column pixel width the heights were computed at.
    pub column_width: f32,
}

impl ColumnAssignment {
    /// An empty assignment with the given column count.
    pub fn empty(column_count: usize, column_width: f32, gap: f32) -> Self {
        let column_count = column_count.max(1);
        Self {
            columns: vec![Vec::new(); column_count],
            heights: vec![gap; column_count],
            column_width,
        }
    }

    /// Total number of photos across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

/// Rendered height of one photo at the given column width, gap included.
///
/// Degenerate geometry falls back to a square aspect ratio and is logged
/// as a data-quality issue; the photo still gets laid out.
fn rendered_height(photo: &Photo, column_width: f32, gap: f32) -> f32 {
    let ratio = match photo.aspect_ratio() {
        Some(ratio) => ratio,
        None => {
            warn!(
                "photo {} has degenerate dimensions {}x{}, using fallback aspect ratio",
                photo.id, photo.width, photo.height
            );
            FALLBACK_ASPECT_RATIO
        }
    };

    let height = column_width / ratio + gap;
    if height.is_finite() {
        height.max(MIN_RENDERED_HEIGHT)
    } else {
        MIN_RENDERED_HEIGHT
    }
}

/// Distribute `photos` into `column_count` columns of `column_width`
/// pixels, with `gap` pixels of vertical spacing between items.
///
/// Photos are processed strictly in input order. Each photo goes to the
/// column with the smallest accumulated height so far; ties break to the
/// lowest column index. Every accumulator starts at `gap`, representing
/// the gap above the first item.
///
/// `column_count` must be at least 1; zero is a caller bug and is
/// promoted to 1 rather than panicking.
pub fn distribute(
    photos: &[Photo],
    column_count: usize,
    column_width: f32,
    gap: f32,
) -> ColumnAssignment {
    let column_count = column_count.max(1);
    let mut assignment = ColumnAssignment::empty(column_count, column_width, gap);

    for photo in photos {
        // First occurrence of the minimum wins the tie
        let shortest = assignment
            .heights
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
            .unwrap_or(0);

        assignment.heights[shortest] += rendered_height(photo, column_width, gap);
        assignment.columns[shortest].push(photo.clone());
    }

    assignment
}
