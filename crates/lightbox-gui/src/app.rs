use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use lightbox_core::bounds::Size;
use lightbox_core::consts::{FEED_SCAN_INTERVAL, RESIZE_DEBOUNCE};
use lightbox_core::controller::{LoadCommit, ViewerController};
use lightbox_core::environment::wait_for_directory;
use lightbox_core::error::LightboxError;
use lightbox_core::feed::DirectoryFeed;
use lightbox_core::image_list::ImageList;
use lightbox_core::loader::{spawn_loader, FsImageSource, LoadOutcome, LoadRequest, LoaderHandle};
use lightbox_core::settings::{FileStore, TraySettings};
use lightbox_core::throttle::{Debounce, Throttle};
use lightbox_core::tray::Tray;

use crate::capture::CursorGrab;
use crate::convert::decoded_to_color_image;
use crate::messages::AppEvent;
use crate::panels;
use crate::states::{FeedStatus, UIState, ViewportState};
use crate::thumbnails::ThumbnailCache;

/// Repaint cadence while a fade or throttled input is in flight.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

pub struct LightboxApp {
    pub events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
    loader: Option<LoaderHandle>,
    pub controller: ViewerController,
    pub tray: Tray,
    tray_rx: mpsc::Receiver<ImageList>,
    feed: Option<DirectoryFeed>,
    feed_throttle: Throttle<()>,
    pub resize: Debounce<Size>,
    pub thumbnails: ThumbnailCache,
    store: Option<FileStore>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl LightboxApp {
    pub fn new(ctx: &egui::Context, watch_dir: Option<PathBuf>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();

        let repaint_ctx = ctx.clone();
        let loader = match spawn_loader(FsImageSource, move || repaint_ctx.request_repaint()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("failed to start image loader: {e}");
                None
            }
        };

        let store = open_store();
        let settings = store
            .as_ref()
            .map(|s| TraySettings::load(s))
            .unwrap_or_default();

        let (tray_tx, tray_rx) = mpsc::channel();
        let mut tray = Tray::new(settings);
        tray.set_update_callback(move |list| {
            let _ = tray_tx.send(list.clone());
        });

        let mut app = Self {
            events_tx,
            events_rx,
            loader,
            controller: ViewerController::with_capture(Box::new(CursorGrab::new(ctx))),
            tray,
            tray_rx,
            feed: None,
            feed_throttle: Throttle::new(FEED_SCAN_INTERVAL),
            resize: Debounce::new(RESIZE_DEBOUNCE),
            thumbnails: ThumbnailCache::new(ctx),
            store,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
        };

        if let Some(dir) = watch_dir {
            app.watch(ctx, dir);
        }
        app
    }

    /// Start watching `path`. The feed starts once the directory exists.
    pub fn watch(&mut self, ctx: &egui::Context, path: PathBuf) {
        self.feed = None;
        self.ui_state.watch_dir = Some(path.clone());
        self.ui_state.feed_status = FeedStatus::Waiting;
        self.ui_state
            .add_log(format!("Waiting for {}", path.display()));

        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        let spawned = std::thread::Builder::new()
            .name("lightbox-env-wait".into())
            .spawn(move || {
                let result = wait_for_directory(&path)
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::FeedReady { path, result });
                ctx.request_repaint();
            });
        if let Err(e) = spawned {
            tracing::error!("failed to spawn environment wait: {e}");
            self.ui_state.feed_status = FeedStatus::Unavailable(e.to_string());
        }
    }

    /// Open the lightbox on the tray's current list.
    pub fn open_viewer(&mut self, index: usize) {
        let request = self.controller.show(self.tray.images(), index);
        self.dispatch(request);
    }

    /// Send a load request to the worker. Without a worker the request
    /// fails immediately so the viewer shows its error state.
    pub fn dispatch(&mut self, request: Option<LoadRequest>) {
        let Some(request) = request else {
            return;
        };
        let sent = match self.loader.as_ref() {
            Some(loader) => loader.request(request.clone()),
            None => Err(LightboxError::WorkerDisconnected),
        };
        if let Err(e) = sent {
            tracing::error!("cannot load {}: {e}", request.locator);
            self.controller
                .complete_load(LoadOutcome::for_request(&request, Err(e)));
        }
    }

    pub fn apply_settings(&mut self, settings: TraySettings) {
        if &settings == self.tray.settings() {
            return;
        }
        self.tray.set_settings(settings);
        self.persist_settings();
    }

    pub fn set_node_hidden(&mut self, node_id: &str, hidden: bool) {
        self.tray.set_node_hidden(node_id, hidden);
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        self.tray.settings().store(store);
        if let Err(e) = store.flush() {
            tracing::warn!("could not save settings: {e}");
        }
    }

    /// Drain events from helper threads.
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::FolderPicked { path } => self.watch(ctx, path),
                AppEvent::FeedReady { path, result } => {
                    if self.ui_state.watch_dir.as_ref() != Some(&path) {
                        // Superseded by a newer folder choice.
                        continue;
                    }
                    match result {
                        Ok(()) => {
                            tracing::info!("watching {}", path.display());
                            self.ui_state.add_log(format!("Watching {}", path.display()));
                            self.ui_state.feed_status = FeedStatus::Watching;
                            self.feed = Some(DirectoryFeed::new(path));
                            self.feed_throttle = Throttle::new(FEED_SCAN_INTERVAL);
                        }
                        Err(reason) => {
                            tracing::warn!("no image feed: {reason}");
                            self.ui_state.add_log(format!("WARNING: {reason}"));
                            self.ui_state.feed_status = FeedStatus::Unavailable(reason);
                        }
                    }
                }
                AppEvent::SettingsImported { settings } => {
                    self.ui_state.add_log("Settings imported".into());
                    self.apply_settings(settings);
                }
                AppEvent::Log { message } => self.ui_state.add_log(message),
            }
        }
    }

    /// Commit finished decodes. Only the current target reaches the screen.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        while let Some(outcome) = self.loader.as_ref().and_then(|l| l.try_recv()) {
            match self.controller.complete_load(outcome) {
                LoadCommit::Loaded(image) => {
                    let texture = ctx.load_texture(
                        "lightbox",
                        decoded_to_color_image(&image),
                        egui::TextureOptions::LINEAR,
                    );
                    self.viewport.texture = Some(texture);
                    self.viewport.texture_locator = self.controller.displayed_locator().cloned();
                }
                LoadCommit::Failed(reason) => {
                    self.ui_state.add_log(format!("ERROR: {reason}"));
                }
                LoadCommit::Stale => {}
            }
        }
    }

    fn poll_feed(&mut self, now: Instant) {
        let Some(feed) = self.feed.as_mut() else {
            return;
        };
        if self.feed_throttle.submit((), now).is_none() {
            return;
        }
        match feed.scan() {
            Ok(events) => {
                for event in events {
                    let count = event.images.len();
                    let node = event.source_node_id.clone();
                    if self.tray.push(event) {
                        self.ui_state
                            .add_log(format!("{count} new image(s) from {node}"));
                    }
                }
            }
            Err(e) => {
                tracing::warn!("scan of {} failed: {e}", feed.root().display());
                self.ui_state.feed_status = FeedStatus::Unavailable(e.to_string());
                self.feed = None;
            }
        }
    }

    /// Forward tray changes to the viewer, keeping its zoom.
    fn poll_tray(&mut self) {
        let Some(list) = self.tray_rx.try_iter().last() else {
            return;
        };
        let keep: HashSet<_> = list.iter().collect();
        self.thumbnails.retain(&keep);
        drop(keep);

        let request = self.controller.replace_image_list(list, true);
        self.dispatch(request);
    }
}

fn open_store() -> Option<FileStore> {
    let path = FileStore::default_path()?;
    match FileStore::open(&path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("ignoring settings at {}: {e}", path.display());
            None
        }
    }
}

impl eframe::App for LightboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll_events(ctx);
        self.poll_loader(ctx);
        self.poll_feed(now);
        self.poll_tray();
        self.thumbnails.poll(ctx);

        if let Some(size) = self.resize.tick(now) {
            self.controller.on_container_resize(size);
        }
        self.controller.tick(now);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::tray::show(ctx, self);
        panels::tray::show_central(ctx, self);
        panels::lightbox::show(ctx, self);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Lightbox")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Lightbox");
                        ui.label("Generated image tray and viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }

        if self.controller.needs_tick() || self.resize.is_pending() {
            ctx.request_repaint_after(ANIMATION_FRAME);
        } else if self.feed.is_some() {
            ctx.request_repaint_after(FEED_SCAN_INTERVAL);
        }
    }
}
