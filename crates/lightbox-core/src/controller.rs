//! Interactive lightbox engine.
//!
//! [`ViewerController`] owns the [`ViewerState`], turns host calls and user
//! input into state transitions, and issues [`LoadRequest`]s. The host runs
//! the decode (see [`crate::loader`]) and hands the outcome back through
//! [`ViewerController::complete_load`], which only commits the result of
//! the most recent request for the current target.

use std::fmt;
use std::time::Instant;

use crate::bounds::{wrap_index, Size, ZoomDirection};
use crate::consts::{CLOSE_FADE, WHEEL_THROTTLE};
use crate::drag::{DragPhase, DragSession, MotionCapture, NoCapture, PointerButton};
use crate::image_list::{ImageList, Locator};
use crate::loader::{DecodedImage, LoadOutcome, LoadRequest, RequestId};
use crate::state::{LoadStatus, ViewerState};
use crate::throttle::Throttle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    Closed,
    /// Visible with nothing to display yet (empty list).
    Opening,
    /// Visible, current image committed.
    Idle,
    Loading { target: usize },
    Error { target: usize },
    /// Fading out; becomes `Closed` in [`ViewerController::tick`].
    Closing { since: Instant },
}

impl fmt::Display for ViewerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Opening => write!(f, "Opening"),
            Self::Idle => write!(f, "Idle"),
            Self::Loading { target } => write!(f, "Loading #{target}"),
            Self::Error { target } => write!(f, "Error #{target}"),
            Self::Closing { .. } => write!(f, "Closing"),
        }
    }
}

/// What happened to a finished load.
#[derive(Debug)]
pub enum LoadCommit {
    /// Result belongs to the current target and is now displayed.
    Loaded(DecodedImage),
    /// Current target failed to decode; the reason is kept for the alt text.
    Failed(String),
    /// Superseded by a newer request; discarded.
    Stale,
}

/// Keyboard actions understood by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerKey {
    Previous,
    Next,
    ZoomIn,
    ZoomOut,
    ResetView,
    Close,
}

#[derive(Clone, Copy, Debug)]
struct WheelInput {
    direction: ZoomDirection,
    fast: bool,
}

pub struct ViewerController {
    state: ViewerState,
    phase: ViewerPhase,
    drag: DragSession,
    capture: Box<dyn MotionCapture>,
    wheel: Throttle<WheelInput>,
    next_request_id: RequestId,
    pending: Option<LoadRequest>,
    /// Locator whose pixels are currently committed.
    committed: Option<Locator>,
    last_error: Option<String>,
}

impl Default for ViewerController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerController {
    pub fn new() -> Self {
        Self::with_capture(Box::new(NoCapture))
    }

    pub fn with_capture(capture: Box<dyn MotionCapture>) -> Self {
        Self {
            state: ViewerState::new(),
            phase: ViewerPhase::Closed,
            drag: DragSession::new(),
            capture,
            wheel: Throttle::new(WHEEL_THROTTLE),
            next_request_id: 0,
            pending: None,
            committed: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Open and accepting input. `false` while fading out.
    pub fn is_open(&self) -> bool {
        !matches!(self.phase, ViewerPhase::Closed | ViewerPhase::Closing { .. })
    }

    /// Something should be drawn (open or fading out).
    pub fn is_visible(&self) -> bool {
        self.phase != ViewerPhase::Closed
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn current_locator(&self) -> Option<&Locator> {
        self.state.current_locator()
    }

    /// Locator of the committed pixels, if they belong to the current index.
    pub fn displayed_locator(&self) -> Option<&Locator> {
        self.committed
            .as_ref()
            .filter(|c| Some(*c) == self.state.current_locator())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn pending_request(&self) -> Option<&LoadRequest> {
        self.pending.as_ref()
    }

    /// Overlay opacity in `[0, 1]`, for the close fade.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            ViewerPhase::Closed => 0.0,
            ViewerPhase::Closing { since } => {
                let t = now.saturating_duration_since(since).as_secs_f32()
                    / CLOSE_FADE.as_secs_f32();
                (1.0 - t).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Timers are running; the host should call [`Self::tick`] again soon.
    pub fn needs_tick(&self) -> bool {
        self.wheel.is_pending() || matches!(self.phase, ViewerPhase::Closing { .. })
    }

    // ------------------------------------------------------------------
    // Host operations
    // ------------------------------------------------------------------

    /// Open on `images` at `start_index` (wrapped into range).
    pub fn show(&mut self, images: ImageList, start_index: usize) -> Option<LoadRequest> {
        self.end_drag();
        self.wheel.cancel();
        self.state.set_images(images, start_index);
        self.committed = None;
        self.last_error = None;
        tracing::info!(
            "lightbox opened: {} images, index {:?}",
            self.state.images().len(),
            self.state.index()
        );

        match self.state.index() {
            Some(index) => Some(self.begin_load(index, false)),
            None => {
                self.show_empty();
                None
            }
        }
    }

    /// Open again with whatever list and index were last shown.
    pub fn reopen(&mut self) -> Option<LoadRequest> {
        if self.is_open() {
            return None;
        }
        let Some(index) = self.state.index() else {
            self.show_empty();
            return None;
        };
        if self.pending.is_some() {
            self.phase = ViewerPhase::Loading { target: index };
            None
        } else if self.displayed_locator().is_some() {
            self.phase = ViewerPhase::Idle;
            None
        } else {
            Some(self.begin_load(index, false))
        }
    }

    /// Start the fade-out. State is kept for the next open.
    pub fn close(&mut self, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.end_drag();
        self.wheel.cancel();
        self.phase = ViewerPhase::Closing { since: now };
        tracing::debug!("lightbox closing");
    }

    /// Move by `delta` positions with wrap-around.
    pub fn navigate(&mut self, delta: isize) -> Option<LoadRequest> {
        let current = self.state.index()?;
        let target = wrap_index(current, delta, self.state.images().len())?;
        self.go_to(target)
    }

    /// Jump to an absolute position (wrapped into range).
    pub fn update_current_image(&mut self, index: usize) -> Option<LoadRequest> {
        let len = self.state.images().len();
        if len == 0 {
            return None;
        }
        self.go_to(index % len)
    }

    /// The host's collection changed without user navigation.
    ///
    /// The displayed image keeps its place in the new list when it is still
    /// present; otherwise the old index is clamped into the new range.
    pub fn replace_image_list(
        &mut self,
        images: ImageList,
        preserve_zoom: bool,
    ) -> Option<LoadRequest> {
        let previous = self.state.current_locator().cloned();
        let old_index = self.state.index().unwrap_or(0);
        let new_index = previous
            .as_ref()
            .and_then(|l| images.position(l))
            .unwrap_or_else(|| old_index.min(images.len().saturating_sub(1)));

        self.state.set_images(images, new_index);
        tracing::debug!(
            "image list replaced: {} images, index {:?}",
            self.state.images().len(),
            self.state.index()
        );

        let Some(index) = self.state.index() else {
            self.end_drag();
            self.pending = None;
            self.committed = None;
            self.state.clear_image();
            self.state.set_load_status(LoadStatus::Idle);
            if self.is_open() {
                self.phase = ViewerPhase::Opening;
            }
            return None;
        };

        let current = self.state.current_locator().cloned();
        let in_flight_for_current = self
            .pending
            .as_ref()
            .is_some_and(|p| Some(&p.locator) == current.as_ref() && p.index == index);
        if in_flight_for_current {
            if self.is_open() {
                self.phase = ViewerPhase::Loading { target: index };
            }
            return None;
        }

        if self.pending.is_none() && self.committed.is_some() && self.committed == current {
            if !preserve_zoom {
                self.end_drag();
                self.state.reset_view();
            }
            self.state.refresh_bounds();
            if self.is_open() {
                self.phase = ViewerPhase::Idle;
            }
            return None;
        }

        if !self.is_open() {
            // Closed: nothing to show; reopen() issues the load.
            self.pending = None;
            return None;
        }
        Some(self.begin_load(index, preserve_zoom))
    }

    /// Apply a finished decode. Only the latest request may commit.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> LoadCommit {
        let is_current = self.pending.as_ref().is_some_and(|p| p.id == outcome.id)
            && self.state.index() == Some(outcome.index);
        if !is_current {
            tracing::debug!(
                "discarding stale load #{} for index {} ({})",
                outcome.id,
                outcome.index,
                outcome.locator
            );
            return LoadCommit::Stale;
        }

        let preserve_zoom = self.pending.take().is_some_and(|p| p.preserve_zoom);
        let index = outcome.index;
        match outcome.result {
            Ok(image) => {
                self.state.commit_image(image.size(), preserve_zoom);
                self.state.set_load_status(LoadStatus::Loaded);
                self.committed = Some(outcome.locator);
                self.last_error = None;
                if self.is_open() {
                    self.phase = ViewerPhase::Idle;
                }
                tracing::debug!("loaded #{index}: {}x{}", image.width, image.height);
                LoadCommit::Loaded(image)
            }
            Err(e) => {
                let reason = e.to_string();
                self.end_drag();
                self.state.clear_image();
                self.state.set_load_status(LoadStatus::Failed);
                self.committed = None;
                self.last_error = Some(reason.clone());
                if self.is_open() {
                    self.phase = ViewerPhase::Error { target: index };
                }
                tracing::warn!("failed to load #{index} ({}): {reason}", outcome.locator);
                LoadCommit::Failed(reason)
            }
        }
    }

    /// The container box changed: re-fit without reloading.
    pub fn on_container_resize(&mut self, size: Size) {
        self.state.set_container(size);
        self.sync_drag_with_bounds();
    }

    /// Advance timers: close fade and throttled wheel input.
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let ViewerPhase::Closing { since } = self.phase {
            if now.saturating_duration_since(since) >= CLOSE_FADE {
                self.phase = ViewerPhase::Closed;
                tracing::debug!("lightbox closed");
            }
            changed = true;
        }
        if let Some(input) = self.wheel.poll(now) {
            changed |= self.apply_zoom(input.direction, input.fast);
        }
        changed
    }

    // ------------------------------------------------------------------
    // User input
    // ------------------------------------------------------------------

    /// Wheel notch. Positive `delta_y` zooms in. Bursts are coalesced to one
    /// update per interval; the latest direction wins.
    pub fn wheel(&mut self, delta_y: f32, fast: bool, now: Instant) -> bool {
        if !self.is_open() || delta_y == 0.0 {
            return false;
        }
        let direction = if delta_y > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        match self.wheel.submit(WheelInput { direction, fast }, now) {
            Some(input) => self.apply_zoom(input.direction, input.fast),
            None => false,
        }
    }

    /// Unthrottled zoom step (buttons, keyboard).
    pub fn zoom(&mut self, direction: ZoomDirection, fast: bool) -> bool {
        self.is_open() && self.apply_zoom(direction, fast)
    }

    /// Pointer pressed. Returns `true` if a capture request went out.
    pub fn pointer_down(&mut self, button: PointerButton, over_image: bool) -> bool {
        if !self.is_open() {
            return false;
        }
        let can_pan = self.state.can_pan() && self.displayed_locator().is_some();
        self.drag
            .begin(button, over_image, can_pan, self.capture.as_mut())
    }

    /// Platform capture grant or loss.
    pub fn capture_changed(&mut self, granted: bool) {
        let phase = self.drag.capture_changed(granted);
        if phase != DragPhase::Dragging {
            // Lost or denied: make sure nothing stays grabbed.
            self.capture.release_capture();
        }
        self.state.set_panning(phase == DragPhase::Dragging);
    }

    /// Relative pointer motion while captured.
    pub fn pointer_motion(&mut self, dx: f32, dy: f32, fast: bool) -> bool {
        let Some((dx, dy)) = self.drag.motion(dx, dy) else {
            return false;
        };
        let before = self.state.pan();
        self.state.pan_by(dx, dy, fast);
        self.state.pan() != before
    }

    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// Double click: back to fit, centered.
    pub fn double_activate(&mut self) {
        self.end_drag();
        self.state.reset_view();
    }

    pub fn key(&mut self, key: ViewerKey, fast: bool, now: Instant) -> Option<LoadRequest> {
        if !self.is_open() {
            return None;
        }
        match key {
            ViewerKey::Previous => return self.navigate(-1),
            ViewerKey::Next => return self.navigate(1),
            ViewerKey::ZoomIn => {
                self.apply_zoom(ZoomDirection::In, fast);
            }
            ViewerKey::ZoomOut => {
                self.apply_zoom(ZoomDirection::Out, fast);
            }
            ViewerKey::ResetView => self.double_activate(),
            ViewerKey::Close => self.close(now),
        }
        None
    }

    // ------------------------------------------------------------------

    fn go_to(&mut self, target: usize) -> Option<LoadRequest> {
        if self.state.index() == Some(target) {
            self.state.refresh_bounds();
            self.sync_drag_with_bounds();
            return None;
        }
        self.end_drag();
        self.state.set_index(Some(target));
        if !self.is_open() {
            // Closed or fading out: remember the position, reopen() loads it.
            self.pending = None;
            return None;
        }
        Some(self.begin_load(target, false))
    }

    fn begin_load(&mut self, index: usize, preserve_zoom: bool) -> LoadRequest {
        self.next_request_id += 1;
        let locator = self
            .state
            .images()
            .get(index)
            .cloned()
            .unwrap_or_else(|| Locator::new(""));
        let request = LoadRequest {
            id: self.next_request_id,
            index,
            locator,
            preserve_zoom,
        };
        if let Some(ref old) = self.pending {
            tracing::debug!("load #{} superseded by #{}", old.id, request.id);
        }
        self.pending = Some(request.clone());
        self.state.set_load_status(LoadStatus::Loading);
        self.phase = ViewerPhase::Loading { target: index };
        request
    }

    fn show_empty(&mut self) {
        self.pending = None;
        self.committed = None;
        self.state.clear_image();
        self.state.set_load_status(LoadStatus::Idle);
        self.phase = ViewerPhase::Opening;
    }

    fn apply_zoom(&mut self, direction: ZoomDirection, fast: bool) -> bool {
        let changed = self.state.zoom(direction, fast);
        self.sync_drag_with_bounds();
        changed
    }

    /// Panning ended inside the state (bounds collapsed): drop the session.
    fn sync_drag_with_bounds(&mut self) {
        if self.drag.is_active() && (!self.state.can_pan() || self.state.bounds().is_collapsed())
        {
            self.end_drag();
        }
    }

    fn end_drag(&mut self) {
        self.drag.release(self.capture.as_mut());
        self.state.set_panning(false);
    }
}
