#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use lightbox_core::bounds::Size;
use lightbox_core::controller::ViewerController;
use lightbox_core::drag::MotionCapture;
use lightbox_core::error::{LightboxError, Result};
use lightbox_core::image_list::{ImageList, Locator};
use lightbox_core::loader::{DecodedImage, ImageSource, LoadOutcome, LoadRequest};

/// Build an image list from plain names.
pub fn image_list(names: &[&str]) -> ImageList {
    names.iter().copied().collect()
}

/// Solid gray RGBA pixels of the given size.
pub fn decoded(width: u32, height: u32) -> DecodedImage {
    DecodedImage {
        width,
        height,
        rgba: vec![128; (width * height * 4) as usize],
    }
}

pub fn success(request: &LoadRequest, width: u32, height: u32) -> LoadOutcome {
    LoadOutcome::for_request(request, Ok(decoded(width, height)))
}

pub fn failure(request: &LoadRequest) -> LoadOutcome {
    LoadOutcome::for_request(
        request,
        Err(LightboxError::LoadFailure {
            locator: request.locator.to_string(),
            reason: "corrupt data".into(),
        }),
    )
}

/// Counters observed through a [`RecordingCapture`].
#[derive(Debug, Default)]
pub struct CaptureLog {
    pub requests: usize,
    pub releases: usize,
    pub deny: bool,
}

/// Capture backend that records calls and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingCapture {
    pub log: Rc<RefCell<CaptureLog>>,
}

impl MotionCapture for RecordingCapture {
    fn request_capture(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if log.deny {
            return Err(LightboxError::CaptureError("denied".into()));
        }
        log.requests += 1;
        Ok(())
    }

    fn release_capture(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// Controller with a recording capture backend and an 800x600 container.
pub fn controller() -> (ViewerController, Rc<RefCell<CaptureLog>>) {
    let capture = RecordingCapture::default();
    let log = Rc::clone(&capture.log);
    let mut c = ViewerController::with_capture(Box::new(capture));
    c.on_container_resize(Size::new(800.0, 600.0));
    (c, log)
}

/// Open `names` at `start` and commit a `width` x `height` image.
pub fn open_loaded(
    names: &[&str],
    start: usize,
    width: u32,
    height: u32,
) -> (ViewerController, Rc<RefCell<CaptureLog>>) {
    let (mut c, log) = controller();
    let req = c.show(image_list(names), start).expect("load request");
    c.complete_load(success(&req, width, height));
    (c, log)
}

/// In-memory image source keyed by locator.
#[derive(Default)]
pub struct MapSource {
    pub images: HashMap<String, (u32, u32)>,
}

impl MapSource {
    pub fn with(mut self, name: &str, width: u32, height: u32) -> Self {
        self.images.insert(name.to_string(), (width, height));
        self
    }
}

impl ImageSource for MapSource {
    fn decode(&self, locator: &Locator) -> Result<DecodedImage> {
        match self.images.get(locator.as_str()) {
            Some(&(w, h)) => Ok(decoded(w, h)),
            None => Err(LightboxError::LoadFailure {
                locator: locator.to_string(),
                reason: "not found".into(),
            }),
        }
    }
}

/// Write a small RGB PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    img.save(path).expect("write png");
}
