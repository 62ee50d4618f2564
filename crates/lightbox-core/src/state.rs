use std::fmt;

use crate::bounds::{
    clamp_pan, compute_fit_scale, compute_pan_bounds, zoom_step, Pan, PanBounds, Size,
    ZoomDirection,
};
use crate::consts::{MAX_SCALE, PAN_SPEED, PAN_SPEED_FAST};
use crate::image_list::{ImageList, Locator};

/// Whether the viewer shows a spinner, the image, or the error affordance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Loaded => write!(f, "Loaded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Where to draw the image inside the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Image size on screen.
    pub display_size: Size,
    /// Offset of the image center from the container center.
    pub offset: Pan,
}

/// Numeric model of the lightbox: list position, zoom and pan.
///
/// Every mutator leaves the state inside its invariants: the index is in
/// range (or `None` for an empty list), the scale is in
/// `[min_scale, max_scale]` and the pan is inside the current bounds.
#[derive(Clone, Debug)]
pub struct ViewerState {
    images: ImageList,
    index: Option<usize>,
    scale: f32,
    min_scale: f32,
    pan: Pan,
    bounds: PanBounds,
    is_panning: bool,
    load_status: LoadStatus,
    image_size: Option<Size>,
    container: Size,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            images: ImageList::default(),
            index: None,
            scale: 1.0,
            min_scale: 1.0,
            pan: Pan::ZERO,
            bounds: PanBounds::NONE,
            is_panning: false,
            load_status: LoadStatus::Idle,
            image_size: None,
            container: Size::default(),
        }
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current_locator(&self) -> Option<&Locator> {
        self.index.and_then(|i| self.images.get(i))
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    /// Effective upper limit; never below the fit scale.
    pub fn max_scale(&self) -> f32 {
        MAX_SCALE.max(self.min_scale)
    }

    pub fn pan(&self) -> Pan {
        self.pan
    }

    pub fn bounds(&self) -> PanBounds {
        self.bounds
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Zoomed in past fit, so a drag would move the image.
    pub fn can_pan(&self) -> bool {
        self.scale > self.min_scale
    }

    /// Replace the list and set the index, wrapping it into range.
    pub(crate) fn set_images(&mut self, images: ImageList, index: usize) {
        self.index = if images.is_empty() {
            None
        } else {
            Some(index % images.len())
        };
        self.images = images;
    }

    pub(crate) fn set_index(&mut self, index: Option<usize>) {
        self.index = index.filter(|&i| i < self.images.len());
    }

    pub(crate) fn set_load_status(&mut self, status: LoadStatus) {
        self.load_status = status;
    }

    pub(crate) fn set_panning(&mut self, panning: bool) {
        self.is_panning = panning;
    }

    /// Forget the committed image (error placeholder or empty list).
    pub fn clear_image(&mut self) {
        self.image_size = None;
        self.min_scale = 1.0;
        self.reset_view();
    }

    /// Record the natural size of a freshly committed image.
    pub fn commit_image(&mut self, size: Size, preserve_zoom: bool) {
        self.image_size = Some(size);
        self.min_scale = self.fit_scale();
        if preserve_zoom {
            self.scale = self.scale.clamp(self.min_scale, self.max_scale());
            self.refresh_bounds();
        } else {
            self.reset_view();
        }
    }

    /// New container box: re-fit without touching the image.
    pub fn set_container(&mut self, container: Size) {
        if container == self.container {
            return;
        }
        let was_at_fit = self.scale <= self.min_scale;
        self.container = container;
        if self.image_size.is_none() {
            return;
        }
        self.min_scale = self.fit_scale();
        self.scale = if was_at_fit {
            self.min_scale
        } else {
            self.scale.clamp(self.min_scale, self.max_scale())
        };
        self.refresh_bounds();
    }

    /// Scale back to fit and pan back to center.
    pub fn reset_view(&mut self) {
        self.scale = self.min_scale;
        self.pan = Pan::ZERO;
        self.bounds = PanBounds::NONE;
        self.is_panning = false;
    }

    /// One zoom step. Returns `true` if the scale changed.
    pub fn zoom(&mut self, direction: ZoomDirection, fast: bool) -> bool {
        if self.image_size.is_none() {
            return false;
        }
        let next = zoom_step(self.scale, direction, fast, self.min_scale, self.max_scale());
        if next == self.scale {
            return false;
        }
        self.scale = next;
        self.refresh_bounds();
        true
    }

    /// Move the image by a pointer delta. Ignored at or below fit.
    pub fn pan_by(&mut self, dx: f32, dy: f32, fast: bool) {
        if !self.can_pan() {
            return;
        }
        let speed = if fast { PAN_SPEED_FAST } else { PAN_SPEED };
        let moved = Pan::new(self.pan.x + dx * speed, self.pan.y + dy * speed);
        self.pan = clamp_pan(moved, self.bounds);
    }

    /// Recompute bounds for the current scale and pull the pan back inside.
    pub fn refresh_bounds(&mut self) {
        let image = self.image_size.unwrap_or_default();
        self.bounds = compute_pan_bounds(self.scale, self.min_scale, image, self.container);
        if self.bounds.is_collapsed() {
            self.pan = Pan::ZERO;
            self.is_panning = false;
        } else {
            self.pan = clamp_pan(self.pan, self.bounds);
        }
    }

    pub fn transform(&self) -> Option<ViewTransform> {
        let size = self.image_size?;
        Some(ViewTransform {
            display_size: size.scaled(self.scale),
            offset: self.pan,
        })
    }

    fn fit_scale(&self) -> f32 {
        match self.image_size {
            Some(size) => compute_fit_scale(size, self.container),
            None => 1.0,
        }
    }
}
