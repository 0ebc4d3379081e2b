/// Async gallery runner
///
/// Connects a [`Gallery`] state machine to a [`PhotoSource`] on tokio.
/// Events arrive over an unbounded channel; fetches authorized by the
/// state machine run concurrently with event processing (so a slow page
/// load never stalls resize handling), and their completions are fed
/// back in as `PageLoaded`. After every step the runner publishes a
/// snapshot on a watch channel for the presentation layer.
///
/// Only one fetch is ever in flight: the pager refuses to mint a second
/// request, so the single `in_flight` slot here can never be clobbered.

use std::future::Future;
use std::pin::Pin;

use log::debug;
use tokio::sync::{mpsc, watch};

use super::trigger::TriggerSubscription;
use super::{Gallery, GalleryEvent};
use crate::config::GalleryConfig;
use crate::error::SourceError;
use crate::layout::ColumnAssignment;
use crate::source::{Page, PhotoSource};

/// What the presentation layer sees after each state change.
#[derive(Debug, Clone)]
pub struct GallerySnapshot {
    /// Current column assignment.
    pub layout: ColumnAssignment,
    /// Whether a page fetch is in flight.
    pub loading: bool,
    /// Whether further pages exist.
    pub has_more: bool,
    /// The most recent fetch error, if any.
    pub error: Option<SourceError>,
}

/// Cloneable handle for feeding events to a running gallery.
#[derive(Clone)]
pub struct GalleryHandle {
    events: mpsc::UnboundedSender<GalleryEvent>,
    snapshots: watch::Receiver<GallerySnapshot>,
}

impl GalleryHandle {
    /// The container was resized.
    pub fn resized(&self, width: f32) {
        let _ = self.events.send(GalleryEvent::Resized { width });
    }

    /// The sentinel moved to `distance` pixels below the viewport bottom.
    pub fn sentinel_moved(&self, distance: f32) {
        let _ = self.events.send(GalleryEvent::SentinelMoved { distance });
    }

    /// One rendering frame elapsed.
    pub fn frame(&self) {
        let _ = self.events.send(GalleryEvent::Frame);
    }

    /// Request the next page (or a fresh first page with `reset`).
    pub fn load_more(&self, reset: bool) {
        let _ = self.events.send(GalleryEvent::LoadMore { reset });
    }

    /// The owning view is going away; stops the runner.
    pub fn teardown(&self) {
        let _ = self.events.send(GalleryEvent::Teardown);
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> GallerySnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that yields every future snapshot.
    pub fn watch(&self) -> watch::Receiver<GallerySnapshot> {
        self.snapshots.clone()
    }
}

/// Owns the state machine and the photo source; see the module docs.
pub struct GalleryRunner<S> {
    gallery: Gallery,
    source: S,
    events: mpsc::UnboundedReceiver<GalleryEvent>,
    snapshots: watch::Sender<GallerySnapshot>,
    /// Held for the runner's lifetime; dropping it (when `run` returns)
    /// releases the sentinel observation.
    sentinel: TriggerSubscription,
}

/// A fetch executing against the source, tagged with its generation.
type InFlightFetch<'a> =
    Pin<Box<dyn Future<Output = (u64, Result<Page, SourceError>)> + Send + 'a>>;

/// Await the occupied fetch slot. The empty arm never resolves; the
/// select branch that polls this is disabled while the slot is empty.
async fn fetch_completion(slot: &mut Option<InFlightFetch<'_>>) -> (u64, Result<Page, SourceError>) {
    match slot {
        Some(fetch) => fetch.as_mut().await,
        None => std::future::pending().await,
    }
}

impl<S: PhotoSource + Sync> GalleryRunner<S> {
    /// Build a runner and the handle that feeds it.
    pub fn new(config: GalleryConfig, source: S) -> (Self, GalleryHandle) {
        let mut gallery = Gallery::new(config);
        let sentinel = gallery.attach_sentinel();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot_of(&gallery));

        let runner = Self {
            gallery,
            source,
            events: event_rx,
            snapshots: snapshot_tx,
            sentinel,
        };
        let handle = GalleryHandle {
            events: event_tx,
            snapshots: snapshot_rx,
        };
        (runner, handle)
    }

    /// Drive the gallery until teardown (or until every handle is gone).
    ///
    /// A fetch still in flight at teardown is simply dropped; the state
    /// machine has already unmounted, so even a completion that raced in
    /// through the channel would be ignored.
    pub async fn run(self) {
        let Self {
            mut gallery,
            source,
            mut events,
            snapshots,
            sentinel,
        } = self;
        let _sentinel = sentinel;

        let mut in_flight: Option<InFlightFetch<'_>> = None;

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else {
                        debug!("all gallery handles dropped, stopping runner");
                        break;
                    };
                    let teardown = matches!(event, GalleryEvent::Teardown);
                    if let Some(request) = gallery.handle(event) {
                        let source = &source;
                        in_flight = Some(Box::pin(async move {
                            let result = source.fetch_page(request.page, request.page_size).await;
                            (request.generation, result)
                        }));
                    }
                    let _ = snapshots.send(snapshot_of(&gallery));
                    if teardown {
                        break;
                    }
                }
                (generation, result) = fetch_completion(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    gallery.handle(GalleryEvent::PageLoaded { generation, result });
                    let _ = snapshots.send(snapshot_of(&gallery));
                }
            }
        }
    }
}

fn snapshot_of(gallery: &Gallery) -> GallerySnapshot {
    GallerySnapshot {
        layout: gallery.layout().clone(),
        loading: gallery.is_loading(),
        has_more: gallery.has_more(),
        error: gallery.error().cloned(),
    }
}
