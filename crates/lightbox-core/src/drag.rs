//! Pan-by-drag under exclusive pointer capture.
//!
//! The session never mutates the view itself; it only decides whether a
//! pointer event belongs to an active drag. The controller applies the
//! deltas to [`crate::state::ViewerState`].

use std::fmt;

use crate::error::Result;

/// Host capability for exclusive relative-motion capture (pointer lock,
/// cursor grab, or plain mouse tracking).
pub trait MotionCapture {
    /// Ask the platform for capture. `Ok` means the request was issued; the
    /// grant itself may arrive later through `capture_changed`.
    fn request_capture(&mut self) -> Result<()>;

    /// Give capture back. Must be safe to call when not captured.
    fn release_capture(&mut self);
}

/// Capture backend that grants nothing. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl MotionCapture for NoCapture {
    fn request_capture(&mut self) -> Result<()> {
        Err(crate::error::LightboxError::CaptureError(
            "pointer capture unavailable".into(),
        ))
    }

    fn release_capture(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Released,
    CaptureRequested,
    Dragging,
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Released => write!(f, "Released"),
            Self::CaptureRequested => write!(f, "Capture requested"),
            Self::Dragging => write!(f, "Dragging"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// State machine for one drag gesture.
#[derive(Debug, Default)]
pub struct DragSession {
    phase: DragPhase,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Released
    }

    /// Pointer pressed. Requests capture when the press may start a pan.
    ///
    /// Returns `true` if capture was requested.
    pub fn begin(
        &mut self,
        button: PointerButton,
        over_image: bool,
        can_pan: bool,
        capture: &mut dyn MotionCapture,
    ) -> bool {
        if self.phase != DragPhase::Released
            || button != PointerButton::Primary
            || !over_image
            || !can_pan
        {
            return false;
        }
        match capture.request_capture() {
            Ok(()) => {
                self.phase = DragPhase::CaptureRequested;
                tracing::debug!("pointer capture requested");
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.phase = DragPhase::Released;
                false
            }
        }
    }

    /// Platform reported a capture change. Returns the new phase.
    pub fn capture_changed(&mut self, granted: bool) -> DragPhase {
        self.phase = match (self.phase, granted) {
            (DragPhase::CaptureRequested | DragPhase::Dragging, true) => DragPhase::Dragging,
            (DragPhase::Released, true) => DragPhase::Released,
            (_, false) => {
                if self.phase != DragPhase::Released {
                    tracing::debug!("pointer capture lost, drag released");
                }
                DragPhase::Released
            }
        };
        self.phase
    }

    /// Motion delta, if it belongs to this session.
    pub fn motion(&self, dx: f32, dy: f32) -> Option<(f32, f32)> {
        self.is_dragging().then_some((dx, dy))
    }

    /// Explicit end (button released, viewer closed, image changed).
    pub fn release(&mut self, capture: &mut dyn MotionCapture) {
        if self.phase != DragPhase::Released {
            capture.release_capture();
            self.phase = DragPhase::Released;
        }
    }
}
