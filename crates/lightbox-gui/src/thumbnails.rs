//! Background thumbnail decoding for the tray.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use lightbox_core::image_list::Locator;
use rayon::prelude::*;

use crate::convert::thumbnail_color_image;

/// Longest thumbnail side in pixels.
const THUMBNAIL_SIZE: u32 = 256;

type ThumbnailResult = (Locator, Result<egui::ColorImage, String>);

pub enum Thumbnail<'a> {
    Ready(&'a egui::TextureHandle),
    Pending,
    Failed,
}

pub struct ThumbnailCache {
    cmd_tx: Option<mpsc::Sender<Vec<Locator>>>,
    result_rx: mpsc::Receiver<ThumbnailResult>,
    textures: HashMap<Locator, egui::TextureHandle>,
    requested: HashSet<Locator>,
    failed: HashSet<Locator>,
}

impl ThumbnailCache {
    pub fn new(ctx: &egui::Context) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Vec<Locator>>();
        let (result_tx, result_rx) = mpsc::channel::<ThumbnailResult>();
        let ctx = ctx.clone();

        let spawned = std::thread::Builder::new()
            .name("lightbox-thumbnails".into())
            .spawn(move || {
                while let Ok(batch) = cmd_rx.recv() {
                    batch.into_par_iter().for_each(|locator| {
                        let result = image::open(locator.as_path())
                            .map(|img| thumbnail_color_image(&img, THUMBNAIL_SIZE))
                            .map_err(|e| e.to_string());
                        let _ = result_tx.send((locator, result));
                    });
                    ctx.request_repaint();
                }
            });

        let cmd_tx = match spawned {
            Ok(_) => Some(cmd_tx),
            Err(e) => {
                tracing::error!("failed to spawn thumbnail thread: {e}");
                None
            }
        };

        Self {
            cmd_tx,
            result_rx,
            textures: HashMap::new(),
            requested: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Upload finished thumbnails as textures.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((locator, result)) = self.result_rx.try_recv() {
            self.requested.remove(&locator);
            match result {
                Ok(image) => {
                    let name = format!("thumb:{locator}");
                    let texture = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
                    self.textures.insert(locator, texture);
                }
                Err(e) => {
                    tracing::warn!("thumbnail for {locator} failed: {e}");
                    self.failed.insert(locator);
                }
            }
        }
    }

    /// Queue every locator not cached or in flight yet.
    pub fn request_missing<'a>(&mut self, locators: impl IntoIterator<Item = &'a Locator>) {
        let missing: Vec<Locator> = locators
            .into_iter()
            .filter(|l| {
                !self.textures.contains_key(*l)
                    && !self.requested.contains(*l)
                    && !self.failed.contains(*l)
            })
            .cloned()
            .collect();
        if missing.is_empty() {
            return;
        }
        let Some(tx) = self.cmd_tx.as_ref() else {
            return;
        };
        self.requested.extend(missing.iter().cloned());
        if tx.send(missing).is_err() {
            tracing::warn!("thumbnail worker disconnected");
            self.cmd_tx = None;
        }
    }

    pub fn get(&self, locator: &Locator) -> Thumbnail<'_> {
        if let Some(texture) = self.textures.get(locator) {
            Thumbnail::Ready(texture)
        } else if self.failed.contains(locator) {
            Thumbnail::Failed
        } else {
            Thumbnail::Pending
        }
    }

    /// Drop textures for images no longer in the tray.
    pub fn retain(&mut self, keep: &HashSet<&Locator>) {
        self.textures.retain(|l, _| keep.contains(l));
        self.failed.retain(|l| keep.contains(l));
    }
}
