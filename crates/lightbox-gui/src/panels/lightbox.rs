//! Full-window overlay showing the current image with zoom and pan.

use std::time::Instant;

use lightbox_core::bounds::Size;
use lightbox_core::controller::ViewerKey;
use lightbox_core::drag::{DragPhase, PointerButton};
use lightbox_core::state::LoadStatus;

use crate::app::LightboxApp;

/// Horizontal room kept for the navigation arrows.
const SIDE_MARGIN: f32 = 64.0;
/// Vertical room kept for the caption and close button.
const TOP_MARGIN: f32 = 40.0;

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    if !app.controller.is_visible() {
        return;
    }
    let now = Instant::now();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("lightbox_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.multiply_opacity(app.controller.opacity(now));
            ui.set_min_size(screen.size());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(235));

            let container = screen.shrink2(egui::vec2(SIDE_MARGIN, TOP_MARGIN));
            track_container(app, container, now);

            let response = ui.interact(
                screen,
                egui::Id::new("lightbox_input"),
                egui::Sense::click_and_drag(),
            );
            let img_rect = image_rect(app, container);

            draw_content(ui, app, container, img_rect);
            draw_chrome(ui, app, screen, now);

            if app.controller.is_open() {
                handle_wheel(ui, &response, app, now);
                handle_drag(ui, &response, app, img_rect);
                handle_keys(ui, app, now);
                if response.double_clicked() {
                    app.controller.double_activate();
                }
            }
        });
}

/// Feed container changes to the controller. The first size applies at
/// once; later ones go through the resize debounce.
fn track_container(app: &mut LightboxApp, container: egui::Rect, now: Instant) {
    let size = Size::new(container.width(), container.height());
    if app.viewport.observed_container == Some(size) {
        return;
    }
    app.viewport.observed_container = Some(size);
    if app.controller.state().container().is_valid() {
        app.resize.schedule(size, now);
    } else {
        app.resize.cancel();
        app.controller.on_container_resize(size);
    }
}

fn image_rect(app: &LightboxApp, container: egui::Rect) -> Option<egui::Rect> {
    let t = app.controller.state().transform()?;
    let center = container.center() + egui::vec2(t.offset.x, t.offset.y);
    Some(egui::Rect::from_center_size(
        center,
        egui::vec2(t.display_size.width, t.display_size.height),
    ))
}

fn draw_content(
    ui: &mut egui::Ui,
    app: &LightboxApp,
    container: egui::Rect,
    img_rect: Option<egui::Rect>,
) {
    match app.controller.state().load_status() {
        LoadStatus::Loaded => {
            let texture = app
                .viewport
                .texture_for(app.controller.displayed_locator());
            if let (Some(texture), Some(img_rect)) = (texture, img_rect) {
                ui.painter_at(container).image(
                    texture.id(),
                    img_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        }
        LoadStatus::Loading => {
            let spinner_rect = egui::Rect::from_center_size(container.center(), egui::vec2(48.0, 48.0));
            ui.put(spinner_rect, egui::Spinner::new().size(48.0));
        }
        LoadStatus::Failed => {
            let name = app
                .controller
                .current_locator()
                .map(|l| l.file_name().to_string())
                .unwrap_or_default();
            let reason = app.controller.last_error().unwrap_or("unknown error");
            ui.painter().text(
                container.center(),
                egui::Align2::CENTER_CENTER,
                format!("Could not display {name}\n{reason}"),
                egui::FontId::proportional(16.0),
                egui::Color32::from_rgb(220, 120, 120),
            );
        }
        LoadStatus::Idle => {
            ui.painter().text(
                container.center(),
                egui::Align2::CENTER_CENTER,
                "No images",
                egui::FontId::proportional(18.0),
                egui::Color32::from_gray(140),
            );
        }
    }
}

/// Caption, counter, arrows and close button.
fn draw_chrome(ui: &mut egui::Ui, app: &mut LightboxApp, screen: egui::Rect, now: Instant) {
    let len = app.controller.state().images().len();
    if let (Some(index), Some(locator)) = (app.controller.current_index(), app.controller.current_locator()) {
        ui.painter().text(
            screen.center_top() + egui::vec2(0.0, TOP_MARGIN / 2.0),
            egui::Align2::CENTER_CENTER,
            format!("{} / {len}  {}", index + 1, locator.file_name()),
            egui::FontId::proportional(14.0),
            egui::Color32::from_white_alpha(200),
        );
    }

    let zoom = app.controller.state().scale() * 100.0;
    ui.painter().text(
        screen.center_bottom() - egui::vec2(0.0, TOP_MARGIN / 2.0),
        egui::Align2::CENTER_CENTER,
        format!("{zoom:.0}%"),
        egui::FontId::proportional(13.0),
        egui::Color32::from_white_alpha(160),
    );

    if !app.controller.is_open() {
        return;
    }

    let close_rect = egui::Rect::from_center_size(
        screen.right_top() + egui::vec2(-SIDE_MARGIN / 2.0, TOP_MARGIN / 2.0),
        egui::vec2(32.0, 32.0),
    );
    if ui.put(close_rect, chrome_button("X")).on_hover_text("Close (Esc)").clicked() {
        app.controller.close(now);
        return;
    }

    if len > 1 {
        let prev_rect = egui::Rect::from_center_size(
            screen.left_center() + egui::vec2(SIDE_MARGIN / 2.0, 0.0),
            egui::vec2(40.0, 64.0),
        );
        let next_rect = egui::Rect::from_center_size(
            screen.right_center() - egui::vec2(SIDE_MARGIN / 2.0, 0.0),
            egui::vec2(40.0, 64.0),
        );
        if ui.put(prev_rect, chrome_button("<")).clicked() {
            let request = app.controller.navigate(-1);
            app.dispatch(request);
        }
        if ui.put(next_rect, chrome_button(">")).clicked() {
            let request = app.controller.navigate(1);
            app.dispatch(request);
        }
    }
}

fn chrome_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.to_string())
            .size(24.0)
            .color(egui::Color32::from_white_alpha(220)),
    )
    .frame(false)
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut LightboxApp, now: Instant) {
    if !response.hovered() {
        return;
    }
    let (delta, fast) = ui.input(|i| {
        // Shift turns vertical wheel motion into horizontal scrolling.
        let d = i.raw_scroll_delta;
        (if d.y != 0.0 { d.y } else { d.x }, i.modifiers.shift)
    });
    if delta != 0.0 {
        app.controller.wheel(delta, fast, now);
    }
}

fn handle_drag(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut LightboxApp,
    img_rect: Option<egui::Rect>,
) {
    let (pressed, pointer) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.interact_pos()));

    if pressed && response.hovered() && app.controller.drag_phase() == DragPhase::Released {
        let over_image = match (img_rect, pointer) {
            (Some(rect), Some(pos)) => rect.contains(pos),
            _ => false,
        };
        if app.controller.pointer_down(PointerButton::Primary, over_image) {
            // Grab requests are fire-and-forget; treat them as granted.
            app.controller.capture_changed(true);
        }
    }

    if app.controller.drag_phase() != DragPhase::Dragging {
        return;
    }

    let (raw, fallback, down, focused, fast) = ui.input(|i| {
        let raw = i
            .events
            .iter()
            .filter_map(|e| match e {
                egui::Event::MouseMoved(delta) => Some(*delta),
                _ => None,
            })
            .fold(egui::Vec2::ZERO, |acc, d| acc + d);
        (
            raw,
            i.pointer.delta(),
            i.pointer.primary_down(),
            i.focused,
            i.modifiers.shift,
        )
    });

    if !focused {
        app.controller.capture_changed(false);
    } else if !down {
        app.controller.pointer_up();
    } else {
        let delta = if raw != egui::Vec2::ZERO { raw } else { fallback };
        if delta != egui::Vec2::ZERO {
            app.controller.pointer_motion(delta.x, delta.y, fast);
        }
    }
}

fn handle_keys(ui: &egui::Ui, app: &mut LightboxApp, now: Instant) {
    let (keys, fast) = ui.input(|i| {
        let mut keys = Vec::new();
        if i.key_pressed(egui::Key::ArrowLeft) {
            keys.push(ViewerKey::Previous);
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            keys.push(ViewerKey::Next);
        }
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            keys.push(ViewerKey::ZoomIn);
        }
        if i.key_pressed(egui::Key::Minus) {
            keys.push(ViewerKey::ZoomOut);
        }
        if i.key_pressed(egui::Key::Num0) {
            keys.push(ViewerKey::ResetView);
        }
        if i.key_pressed(egui::Key::Escape) {
            keys.push(ViewerKey::Close);
        }
        (keys, i.modifiers.shift)
    });

    for key in keys {
        let request = app.controller.key(key, fast, now);
        app.dispatch(request);
    }
}
