//! Out-of-band image decoding.
//!
//! The controller issues [`LoadRequest`]s; a host hands them to a decoder
//! (usually [`spawn_loader`]) and feeds the resulting [`LoadOutcome`]s back
//! through `ViewerController::complete_load`. Decodes are never cancelled.
//! Superseded results are filtered at commit time.

use std::sync::mpsc;

use crate::bounds::Size;
use crate::error::{LightboxError, Result};
use crate::image_list::Locator;

/// Monotonic id of a load request.
pub type RequestId = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub id: RequestId,
    pub index: usize,
    pub locator: Locator,
    /// Keep the current zoom/pan when this load commits.
    pub preserve_zoom: bool,
}

/// Decoded RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub id: RequestId,
    pub index: usize,
    pub locator: Locator,
    pub result: Result<DecodedImage>,
}

impl LoadOutcome {
    pub fn for_request(request: &LoadRequest, result: Result<DecodedImage>) -> Self {
        Self {
            id: request.id,
            index: request.index,
            locator: request.locator.clone(),
            result,
        }
    }
}

/// Something that can turn a locator into pixels.
pub trait ImageSource: Send + 'static {
    fn decode(&self, locator: &Locator) -> Result<DecodedImage>;
}

/// Decodes image files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn decode(&self, locator: &Locator) -> Result<DecodedImage> {
        let img = image::open(locator.as_path())?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(LightboxError::LoadFailure {
                locator: locator.to_string(),
                reason: format!("invalid dimensions {width}x{height}"),
            });
        }
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Read only the pixel dimensions, without a full decode.
pub fn probe_dimensions(locator: &Locator) -> Result<Size> {
    let (w, h) = image::image_dimensions(locator.as_path())?;
    Ok(Size::new(w as f32, h as f32))
}

/// Channels to a running loader thread.
pub struct LoaderHandle {
    cmd_tx: mpsc::Sender<LoadRequest>,
    result_rx: mpsc::Receiver<LoadOutcome>,
}

impl LoaderHandle {
    pub fn request(&self, request: LoadRequest) -> Result<()> {
        self.cmd_tx
            .send(request)
            .map_err(|_| LightboxError::WorkerDisconnected)
    }

    /// Next finished load, if any.
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        self.result_rx.try_recv().ok()
    }

    /// Block until the next finished load. `None` once the worker is gone.
    pub fn recv(&self) -> Option<LoadOutcome> {
        self.result_rx.recv().ok()
    }
}

/// Spawn the decode thread. `waker` runs after every finished load so the
/// host can schedule a redraw.
pub fn spawn_loader<S, W>(source: S, waker: W) -> Result<LoaderHandle>
where
    S: ImageSource,
    W: Fn() + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoadRequest>();
    let (result_tx, result_rx) = mpsc::channel::<LoadOutcome>();

    std::thread::Builder::new()
        .name("lightbox-loader".into())
        .spawn(move || loader_loop(&source, &cmd_rx, &result_tx, &waker))?;

    Ok(LoaderHandle { cmd_tx, result_rx })
}

fn loader_loop(
    source: &dyn ImageSource,
    cmd_rx: &mpsc::Receiver<LoadRequest>,
    result_tx: &mpsc::Sender<LoadOutcome>,
    waker: &dyn Fn(),
) {
    while let Ok(mut request) = cmd_rx.recv() {
        // Only the newest queued request can still be committed.
        while let Ok(newer) = cmd_rx.try_recv() {
            tracing::debug!("skipping superseded load #{} ({})", request.id, request.locator);
            request = newer;
        }

        tracing::debug!("decoding #{} {}", request.id, request.locator);
        let result = source.decode(&request.locator);
        if let Err(ref e) = result {
            tracing::warn!("decode failed for {}: {e}", request.locator);
        }

        if result_tx
            .send(LoadOutcome::for_request(&request, result))
            .is_err()
        {
            break;
        }
        waker();
    }
    tracing::debug!("loader thread exiting");
}
