use crate::app::LightboxApp;

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 3 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            ui.label(app.ui_state.feed_status.to_string());
            if let Some(ref dir) = app.ui_state.watch_dir {
                ui.label(dir.display().to_string());
            }
            ui.separator();
            ui.label(format!(
                "{} batches, {} images",
                app.tray.batch_count(),
                app.tray.images().len()
            ));

            if app.controller.is_open() {
                let state = app.controller.state();
                ui.separator();
                ui.label(format!("Viewer: {}", app.controller.phase()));
                if let Some(size) = state.image_size() {
                    ui.separator();
                    ui.label(format!("{}x{}", size.width, size.height));
                }
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", state.scale() * 100.0));
            }
        });

        ui.add_space(2.0);
    });
}
