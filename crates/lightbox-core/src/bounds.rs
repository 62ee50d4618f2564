//! Pure zoom/pan arithmetic shared by the viewer state and the hosts.
//!
//! Everything here works in container pixels. Scale `1.0` draws the image at
//! its natural size; the fit scale is the largest scale at which the whole
//! image is visible.

use crate::consts::{PAN_COLLAPSE_EPSILON, ZOOM_STEP, ZOOM_STEP_FAST};

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

/// Pan offset of the image center relative to the container center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pan {
    pub x: f32,
    pub y: f32,
}

impl Pan {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Largest allowed absolute pan offset per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanBounds {
    pub max_x: f32,
    pub max_y: f32,
}

impl PanBounds {
    pub const NONE: Self = Self {
        max_x: 0.0,
        max_y: 0.0,
    };

    /// No meaningful room to pan on either axis.
    pub fn is_collapsed(&self) -> bool {
        self.max_x < PAN_COLLAPSE_EPSILON && self.max_y < PAN_COLLAPSE_EPSILON
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Circular index arithmetic. Returns `None` for an empty list.
pub fn wrap_index(current: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len_i = len as i64;
    let wrapped = (current as i64 + delta as i64).rem_euclid(len_i);
    Some(wrapped as usize)
}

/// Scale that fits the whole image into the container, upscaling small images.
///
/// Degenerate sizes (an image that has not decoded yet, a collapsed panel)
/// yield `1.0` so callers never see NaN or infinity.
pub fn compute_fit_scale(image: Size, container: Size) -> f32 {
    if !image.is_valid() || !container.is_valid() {
        return 1.0;
    }
    let fit_x = container.width / image.width;
    let fit_y = container.height / image.height;
    fit_x.min(fit_y)
}

/// Pan limits for the given scale. Panning is disabled at or below fit.
pub fn compute_pan_bounds(scale: f32, min_scale: f32, image: Size, container: Size) -> PanBounds {
    if scale <= min_scale {
        return PanBounds::NONE;
    }
    let scaled = image.scaled(scale);
    PanBounds {
        max_x: ((scaled.width - container.width) / 2.0).max(0.0),
        max_y: ((scaled.height - container.height) / 2.0).max(0.0),
    }
}

pub fn clamp_pan(pan: Pan, bounds: PanBounds) -> Pan {
    Pan {
        x: pan.x.clamp(-bounds.max_x, bounds.max_x),
        y: pan.y.clamp(-bounds.max_y, bounds.max_y),
    }
}

/// Zoom factor for one step, `fast` being the held modifier.
pub fn zoom_factor(fast: bool) -> f32 {
    if fast {
        ZOOM_STEP_FAST
    } else {
        ZOOM_STEP
    }
}

/// One zoom step in `direction`, clamped to `[min_scale, max_scale]`.
pub fn zoom_step(
    scale: f32,
    direction: ZoomDirection,
    fast: bool,
    min_scale: f32,
    max_scale: f32,
) -> f32 {
    let factor = zoom_factor(fast);
    let next = match direction {
        ZoomDirection::In => scale * factor,
        ZoomDirection::Out => scale / factor,
    };
    // A fit scale above the hard limit (tiny image, huge container) wins.
    next.clamp(min_scale, max_scale.max(min_scale))
}
