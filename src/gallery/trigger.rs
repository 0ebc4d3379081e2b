/// Scroll-sentinel visibility trigger
///
/// Watches how far the load-more sentinel sits below the viewport's
/// bottom edge and decides when a load should start. Positions reported
/// between frames are coalesced: only the most recent one is evaluated,
/// once, when the frame arrives. A local busy flag stops repeat firing
/// while the triggered load is still pending, independent of (but
/// settled together with) the pager's own in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Guard for an active sentinel observation.
///
/// Dropping the subscription releases the observation: the trigger stops
/// evaluating positions and can never fire again until re-attached. This
/// is the teardown step the owning view performs (implicitly, by letting
/// the guard fall out of scope) when it unmounts or swaps the sentinel.
#[derive(Debug)]
pub struct TriggerSubscription {
    active: Arc<AtomicBool>,
}

impl Drop for TriggerSubscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
    }
}

/// Decides when the sentinel's position warrants loading more photos.
#[derive(Debug)]
pub struct VisibilityTrigger {
    /// How far below the viewport bottom the sentinel may sit and still
    /// count as "approaching", in pixels.
    lookahead_margin: f32,
    /// Mirrors the pager's has-more flag; a disabled trigger never fires.
    enabled: bool,
    /// Set when this trigger started a load that has not settled yet.
    busy: bool,
    /// Latest sentinel distance reported since the last frame.
    pending_distance: Option<f32>,
    /// Shared with the current subscription guard; false once released.
    active: Arc<AtomicBool>,
}

impl VisibilityTrigger {
    /// A trigger with no active observation. Positions are ignored until
    /// [`attach`](Self::attach) is called.
    pub fn new(lookahead_margin: f32) -> Self {
        Self {
            lookahead_margin,
            enabled: true,
            busy: false,
            pending_distance: None,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Begin observing the sentinel. Any previous observation is
    /// replaced; the returned guard releases this one when dropped.
    pub fn attach(&mut self) -> TriggerSubscription {
        let active = Arc::new(AtomicBool::new(true));
        self.active = Arc::clone(&active);
        self.pending_distance = None;
        self.busy = false;
        TriggerSubscription { active }
    }

    /// Whether an observation is currently attached and not released.
    pub fn is_attached(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Record the sentinel's distance below the viewport bottom edge
    /// (negative when the sentinel is already on screen). Repeated calls
    /// within one frame overwrite each other; evaluation happens in
    /// [`poll`](Self::poll).
    pub fn observe(&mut self, distance: f32) {
        if self.is_attached() {
            self.pending_distance = Some(distance);
        }
    }

    /// Enable or disable firing. Disabling (when the source is
    /// exhausted) also drops any position recorded this frame.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending_distance = None;
        }
    }

    /// Evaluate the frame's recorded position. Returns true exactly when
    /// a load should start now; the trigger then stays busy until
    /// [`settle`](Self::settle).
    pub fn poll(&mut self) -> bool {
        let Some(distance) = self.pending_distance.take() else {
            return false;
        };
        if !self.is_attached() || !self.enabled || self.busy {
            return false;
        }
        if distance <= self.lookahead_margin {
            self.busy = true;
            return true;
        }
        false
    }

    /// The load started by the last firing has finished (either way).
    pub fn settle(&mut self) {
        self.busy = false;
    }
}
