/// Gallery orchestration
///
/// This module handles:
/// - The event-driven gallery state machine (this file)
/// - Page-load coordination and the in-flight guard (pagination.rs)
/// - The scroll-sentinel visibility trigger (trigger.rs)
/// - An async runner wiring a photo source to the state machine (runner.rs)
///
/// The orchestrator owns the accumulated photo collection and the
/// current column assignment. It performs no I/O: handling an event may
/// yield a `FetchRequest`, which the embedder (normally the runner)
/// executes and answers with a `PageLoaded` event.

pub mod pagination;
pub mod runner;
pub mod trigger;

pub use pagination::{FetchRequest, Pager};
pub use runner::{GalleryHandle, GalleryRunner, GallerySnapshot};
pub use trigger::{TriggerSubscription, VisibilityTrigger};

use log::debug;

use crate::config::GalleryConfig;
use crate::error::SourceError;
use crate::layout::columns::{column_width, resolve_column_count};
use crate::layout::{distribute, ColumnAssignment};
use crate::photo::Photo;
use crate::source::Page;

/// Everything that can happen to a gallery.
#[derive(Debug)]
pub enum GalleryEvent {
    /// The container was resized. Applied on the next `Frame`.
    Resized { width: f32 },
    /// The load-more sentinel moved; `distance` is how far it sits below
    /// the viewport's bottom edge (negative when already visible).
    /// Evaluated on the next `Frame`.
    SentinelMoved { distance: f32 },
    /// One rendering frame elapsed. Applies pending resize/sentinel
    /// state, so resize relayouts and trigger dispatches happen at most
    /// once per frame no matter how fast events arrive.
    Frame,
    /// Explicit load request from the presentation layer (initial load,
    /// retry button, or returning to the gallery root with `reset`).
    LoadMore { reset: bool },
    /// A fetch issued earlier has completed.
    PageLoaded {
        generation: u64,
        result: Result<Page, SourceError>,
    },
    /// The owning view is going away; ignore everything from now on.
    Teardown,
}

/// The masonry gallery state machine.
pub struct Gallery {
    config: GalleryConfig,
    photos: Vec<Photo>,
    layout: ColumnAssignment,
    pager: Pager,
    trigger: VisibilityTrigger,
    error: Option<SourceError>,
    container_width: f32,
    column_count: usize,
    pending_width: Option<f32>,
    mounted: bool,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        let column_count = 1;
        let width = column_width(0.0, column_count, &config);
        Self {
            photos: Vec::new(),
            layout: ColumnAssignment::empty(column_count, width, config.gap),
            pager: Pager::new(config.page_size),
            trigger: VisibilityTrigger::new(config.lookahead_margin),
            error: None,
            container_width: 0.0,
            column_count,
            pending_width: None,
            mounted: true,
            config,
        }
    }

    /// Begin observing the scroll sentinel. The returned guard must be
    /// held for as long as the sentinel exists; dropping it releases the
    /// observation.
    pub fn attach_sentinel(&mut self) -> TriggerSubscription {
        self.trigger.attach()
    }

    /// Advance the state machine by one event.
    ///
    /// Returns a fetch the embedder must execute, if the event resulted
    /// in one. After `Teardown` every event is ignored, which is what
    /// protects shared state from completions of fetches that were still
    /// in flight when the view went away.
    pub fn handle(&mut self, event: GalleryEvent) -> Option<FetchRequest> {
        if !self.mounted {
            debug!("event after teardown ignored: {event:?}");
            return None;
        }

        match event {
            GalleryEvent::Resized { width } => {
                self.pending_width = Some(width);
                None
            }
            GalleryEvent::SentinelMoved { distance } => {
                self.trigger.observe(distance);
                None
            }
            GalleryEvent::Frame => {
                if let Some(width) = self.pending_width.take() {
                    self.apply_resize(width);
                }
                if self.trigger.poll() {
                    self.begin_load(false)
                } else {
                    None
                }
            }
            GalleryEvent::LoadMore { reset } => self.begin_load(reset),
            GalleryEvent::PageLoaded { generation, result } => {
                self.apply_completion(generation, result);
                None
            }
            GalleryEvent::Teardown => {
                self.mounted = false;
                None
            }
        }
    }

    fn begin_load(&mut self, reset: bool) -> Option<FetchRequest> {
        self.pager.begin_load(reset)
    }

    fn apply_resize(&mut self, width: f32) {
        let count = resolve_column_count(width, &self.config);
        if count == self.column_count && (width - self.container_width).abs() < f32::EPSILON {
            return;
        }
        self.container_width = width;
        self.column_count = count;
        // Existing photos only; a resize never fetches
        self.relayout();
    }

    fn apply_completion(&mut self, generation: u64, result: Result<Page, SourceError>) {
        match result {
            Ok(page) => {
                let Some(request) = self.pager.complete_success(generation, page.has_next_page)
                else {
                    return;
                };
                if request.reset {
                    self.photos.clear();
                }
                debug!(
                    "page {} delivered {} photos (has_next: {})",
                    request.page,
                    page.photos.len(),
                    page.has_next_page
                );
                self.photos.extend(page.photos);
                self.error = None;
                self.trigger.set_enabled(self.pager.has_more());
                self.trigger.settle();
                self.relayout();
            }
            Err(error) => {
                if self.pager.complete_failure(generation).is_none() {
                    return;
                }
                debug!("page fetch failed: {error}");
                self.error = Some(error);
                self.trigger.settle();
            }
        }
    }

    fn relayout(&mut self) {
        let width = column_width(self.container_width, self.column_count, &self.config);
        self.layout = distribute(&self.photos, self.column_count, width, self.config.gap);
    }

    /// The current column assignment for the presentation layer.
    pub fn layout(&self) -> &ColumnAssignment {
        &self.layout
    }

    /// The accumulated photo collection, in load order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Whether a page fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.pager.is_loading()
    }

    /// Whether the data source has further pages.
    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    /// The most recent fetch error, cleared by the next successful load.
    pub fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    /// Current column count.
    pub fn column_count(&self) -> usize {
        self.column_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::sample_photo;

    fn config() -> GalleryConfig {
        GalleryConfig {
            min_column_width: 250.0,
            lateral_padding: 32.0,
            max_columns: 4,
            gap: 16.0,
            page_size: 10,
            lookahead_margin: 300.0,
        }
    }

    fn page(ids: std::ops::RangeInclusive<u64>, has_next_page: bool) -> Page {
        Page {
            photos: ids.map(|id| sample_photo(id, 1200, 800)).collect(),
            has_next_page,
        }
    }

    fn load_page(gallery: &mut Gallery, reset: bool, ids: std::ops::RangeInclusive<u64>, more: bool) {
        let request = gallery.handle(GalleryEvent::LoadMore { reset }).unwrap();
        gallery.handle(GalleryEvent::PageLoaded {
            generation: request.generation,
            result: Ok(page(ids, more)),
        });
    }

    #[test]
    fn test_load_appends_and_relayouts() {
        let mut gallery = Gallery::new(config());
        load_page(&mut gallery, false, 1..=10, true);
        load_page(&mut gallery, false, 11..=20, true);

        assert_eq!(gallery.photos().len(), 20);
        assert_eq!(gallery.layout().len(), 20);
        assert!(!gallery.is_loading());
        assert!(gallery.has_more());
    }

    #[test]
    fn test_resize_relayouts_without_fetch() {
        let mut gallery = Gallery::new(config());
        load_page(&mut gallery, false, 1..=10, true);
        assert_eq!(gallery.column_count(), 1);

        gallery.handle(GalleryEvent::Resized { width: 1100.0 });
        // Nothing applied until the frame
        assert_eq!(gallery.column_count(), 1);

        let command = gallery.handle(GalleryEvent::Frame);
        assert!(command.is_none(), "resize must never fetch");
        assert_eq!(gallery.column_count(), 4);
        assert_eq!(gallery.layout().len(), 10);
    }

    #[test]
    fn test_resizes_coalesce_to_one_relayout_per_frame() {
        let mut gallery = Gallery::new(config());
        load_page(&mut gallery, false, 1..=10, true);

        // A burst of resize events within one frame: last one wins
        gallery.handle(GalleryEvent::Resized { width: 600.0 });
        gallery.handle(GalleryEvent::Resized { width: 900.0 });
        gallery.handle(GalleryEvent::Resized { width: 1100.0 });
        gallery.handle(GalleryEvent::Frame);
        assert_eq!(gallery.column_count(), 4);
    }

    #[test]
    fn test_sentinel_drives_next_page() {
        let mut gallery = Gallery::new(config());
        let _sub = gallery.attach_sentinel();
        load_page(&mut gallery, false, 1..=10, true);

        gallery.handle(GalleryEvent::SentinelMoved { distance: 150.0 });
        let request = gallery.handle(GalleryEvent::Frame).unwrap();
        assert_eq!(request.page, 2);

        // Sentinel keeps reporting while the fetch is pending: no re-fire
        gallery.handle(GalleryEvent::SentinelMoved { distance: 100.0 });
        assert!(gallery.handle(GalleryEvent::Frame).is_none());
    }

    #[test]
    fn test_exhausted_source_disables_sentinel() {
        let mut gallery = Gallery::new(config());
        let _sub = gallery.attach_sentinel();
        load_page(&mut gallery, false, 1..=10, false);

        assert!(!gallery.has_more());
        gallery.handle(GalleryEvent::SentinelMoved { distance: 0.0 });
        assert!(gallery.handle(GalleryEvent::Frame).is_none());
        assert!(gallery.handle(GalleryEvent::LoadMore { reset: false }).is_none());
    }

    #[test]
    fn test_reset_discards_prior_photos() {
        let mut gallery = Gallery::new(config());
        load_page(&mut gallery, false, 1..=10, true);
        load_page(&mut gallery, false, 11..=20, true);

        load_page(&mut gallery, true, 101..=110, true);
        let ids: Vec<u64> = gallery.photos().iter().map(|p| p.id).collect();
        assert_eq!(ids, (101..=110).collect::<Vec<_>>());
        assert_eq!(gallery.layout().len(), 10);
    }

    #[test]
    fn test_failure_keeps_collection_and_is_retryable() {
        let mut gallery = Gallery::new(config());
        load_page(&mut gallery, false, 1..=10, true);

        let request = gallery.handle(GalleryEvent::LoadMore { reset: false }).unwrap();
        assert_eq!(request.page, 2);
        gallery.handle(GalleryEvent::PageLoaded {
            generation: request.generation,
            result: Err(SourceError::Transport("connection reset".into())),
        });

        assert_eq!(gallery.photos().len(), 10, "failed page must not mutate the collection");
        assert!(gallery.error().is_some());
        assert!(!gallery.is_loading());

        // Retry fetches the same page, and success clears the error
        let retry = gallery.handle(GalleryEvent::LoadMore { reset: false }).unwrap();
        assert_eq!(retry.page, 2);
        gallery.handle(GalleryEvent::PageLoaded {
            generation: retry.generation,
            result: Ok(page(11..=20, true)),
        });
        assert!(gallery.error().is_none());
        assert_eq!(gallery.photos().len(), 20);
    }

    #[test]
    fn test_completion_after_teardown_is_ignored() {
        let mut gallery = Gallery::new(config());
        let request = gallery.handle(GalleryEvent::LoadMore { reset: false }).unwrap();

        gallery.handle(GalleryEvent::Teardown);
        gallery.handle(GalleryEvent::PageLoaded {
            generation: request.generation,
            result: Ok(page(1..=10, true)),
        });

        assert!(gallery.photos().is_empty(), "stale completion mutated a torn-down gallery");
    }

    #[test]
    fn test_duplicate_load_while_in_flight_yields_no_request() {
        let mut gallery = Gallery::new(config());
        let first = gallery.handle(GalleryEvent::LoadMore { reset: false });
        assert!(first.is_some());
        assert!(gallery.handle(GalleryEvent::LoadMore { reset: false }).is_none());
        assert!(gallery.is_loading());
    }
}
