use lightbox_core::image_list::Locator;
use lightbox_core::settings::TrayLocation;
use lightbox_core::tray::Batch;

use crate::app::LightboxApp;
use crate::panels::helpers::placeholder;
use crate::thumbnails::Thumbnail;

/// Space reserved for the node label above each batch.
const LABEL_HEIGHT: f32 = 22.0;
const MIN_THUMBNAIL: f32 = 32.0;

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    let settings = app.tray.settings().clone();
    if !settings.visible {
        return;
    }

    let batches = app.tray.visible_batches();
    app.thumbnails
        .request_missing(batches.iter().flat_map(|b| b.images.iter()));

    let extent = settings.tray_height.max(MIN_THUMBNAIL + LABEL_HEIGHT);
    let mut clicked = None;

    match settings.location {
        TrayLocation::Bottom => {
            egui::TopBottomPanel::bottom("tray")
                .exact_height(extent)
                .show(ctx, |ui| strip(ui, app, &batches, extent, &mut clicked));
        }
        TrayLocation::Top => {
            egui::TopBottomPanel::top("tray")
                .exact_height(extent)
                .show(ctx, |ui| strip(ui, app, &batches, extent, &mut clicked));
        }
        TrayLocation::Left => {
            egui::SidePanel::left("tray")
                .exact_width(extent)
                .show(ctx, |ui| column(ui, app, &batches, extent, &mut clicked));
        }
        TrayLocation::Right => {
            egui::SidePanel::right("tray")
                .exact_width(extent)
                .show(ctx, |ui| column(ui, app, &batches, extent, &mut clicked));
        }
    }

    if let Some(locator) = clicked {
        if let Some(index) = app.tray.position(&locator) {
            app.open_viewer(index);
        }
    }
}

/// Central area behind the lightbox.
pub fn show_central(ctx: &egui::Context, app: &mut LightboxApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let text = if app.ui_state.watch_dir.is_none() {
            "Open an output folder to collect generated images"
        } else if app.tray.images().is_empty() {
            "Waiting for generated images"
        } else if !app.tray.settings().visible {
            "Tray hidden (View > Show Tray)"
        } else {
            "Click a thumbnail to open it"
        };
        placeholder(ui, text);
    });
}

/// Horizontal tray: batches side by side.
fn strip(
    ui: &mut egui::Ui,
    app: &LightboxApp,
    batches: &[Batch],
    extent: f32,
    clicked: &mut Option<Locator>,
) {
    let side = (extent - LABEL_HEIGHT - 8.0).max(MIN_THUMBNAIL);
    egui::ScrollArea::horizontal().show(ui, |ui| {
        ui.horizontal(|ui| {
            if batches.is_empty() {
                ui.weak("No images");
            }
            for batch in batches {
                ui.vertical(|ui| {
                    ui.small(&batch.source_node_id);
                    ui.horizontal(|ui| {
                        for locator in &batch.images {
                            if thumbnail(ui, app, locator, side).clicked() {
                                *clicked = Some(locator.clone());
                            }
                        }
                    });
                });
                ui.separator();
            }
        });
    });
}

/// Vertical tray: batches stacked, thumbnails wrapped.
fn column(
    ui: &mut egui::Ui,
    app: &LightboxApp,
    batches: &[Batch],
    extent: f32,
    clicked: &mut Option<Locator>,
) {
    let side = (extent - 16.0).max(MIN_THUMBNAIL);
    egui::ScrollArea::vertical().show(ui, |ui| {
        if batches.is_empty() {
            ui.weak("No images");
        }
        for batch in batches {
            ui.small(&batch.source_node_id);
            for locator in &batch.images {
                if thumbnail(ui, app, locator, side).clicked() {
                    *clicked = Some(locator.clone());
                }
            }
            ui.separator();
        }
    });
}

fn thumbnail(ui: &mut egui::Ui, app: &LightboxApp, locator: &Locator, side: f32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));

    match app.thumbnails.get(locator) {
        Thumbnail::Ready(texture) => {
            let size = texture.size_vec2();
            let scale = (side / size.x).min(side / size.y);
            let img_rect = egui::Rect::from_center_size(rect.center(), size * scale);
            painter.image(
                texture.id(),
                img_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        Thumbnail::Pending => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "...",
                egui::FontId::proportional(14.0),
                egui::Color32::from_gray(120),
            );
        }
        Thumbnail::Failed => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "?",
                egui::FontId::proportional(20.0),
                egui::Color32::from_rgb(200, 90, 90),
            );
        }
    }

    let is_current = app.controller.is_open() && app.controller.current_locator() == Some(locator);
    if is_current || response.hovered() {
        let color = if is_current {
            egui::Color32::from_rgb(255, 200, 80)
        } else {
            egui::Color32::LIGHT_BLUE
        };
        painter.rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(2.0, color),
            egui::StrokeKind::Inside,
        );
    }

    response.on_hover_text(locator.file_name())
}
