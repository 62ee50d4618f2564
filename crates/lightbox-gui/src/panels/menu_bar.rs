use lightbox_core::settings::{SortOrder, TrayLocation, TraySettings};

use crate::app::LightboxApp;
use crate::messages::AppEvent;
use crate::panels::helpers::enum_combo;

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let tray_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::T);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    open_folder(app);
                }

                ui.separator();

                if ui.button("Import Settings...").clicked() {
                    ui.close();
                    import_settings(app);
                }

                if ui.button("Export Settings...").clicked() {
                    ui.close();
                    export_settings(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| view_menu(ui, ctx, app, &tray_shortcut));

            ui.menu_button("Nodes", |ui| nodes_menu(ui, app));

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_folder(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&tray_shortcut)) {
            let mut settings = app.tray.settings().clone();
            settings.visible = !settings.visible;
            app.apply_settings(settings);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn view_menu(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    app: &mut LightboxApp,
    tray_shortcut: &egui::KeyboardShortcut,
) {
    let mut settings = app.tray.settings().clone();

    ui.horizontal(|ui| {
        ui.checkbox(&mut settings.visible, "Show Tray");
        ui.weak(ctx.format_shortcut(tray_shortcut));
    });
    enum_combo(ui, "Location", &mut settings.location, TrayLocation::ALL);
    enum_combo(ui, "Sort", &mut settings.sort_order, SortOrder::ALL);
    ui.checkbox(&mut settings.newest_first, "Newest first");
    ui.add(egui::Slider::new(&mut settings.max_batches, 1..=64).text("Max batches"));
    ui.add(egui::Slider::new(&mut settings.tray_height, 60.0..=400.0).text("Tray size"));

    if ui.button("Reset Defaults").clicked() {
        ui.close();
        settings = TraySettings::default();
        app.ui_state.add_log("Tray settings reset to defaults".into());
    }

    app.apply_settings(settings);

    ui.separator();

    let has_images = !app.tray.images().is_empty();
    if ui
        .add_enabled(has_images, egui::Button::new("Open Lightbox"))
        .clicked()
    {
        ui.close();
        let request = if app.controller.current_index().is_some() {
            app.controller.reopen()
        } else {
            app.controller.show(app.tray.images(), 0)
        };
        app.dispatch(request);
    }

    if ui.button("Clear Tray").clicked() {
        ui.close();
        app.tray.clear();
        app.ui_state.add_log("Tray cleared".into());
    }
}

fn nodes_menu(ui: &mut egui::Ui, app: &mut LightboxApp) {
    let nodes: Vec<String> = app.tray.node_ids().into_iter().map(String::from).collect();
    let hidden: Vec<String> = app
        .tray
        .settings()
        .node_filter
        .iter()
        .filter(|n| !nodes.contains(*n))
        .cloned()
        .collect();

    if nodes.is_empty() && hidden.is_empty() {
        ui.weak("No nodes yet");
        return;
    }

    // Filtered nodes without current batches stay listed so they can be shown again.
    for node in nodes.iter().chain(hidden.iter()) {
        let mut visible = !app.tray.settings().is_node_hidden(node);
        if ui.checkbox(&mut visible, node.as_str()).changed() {
            app.set_node_hidden(node, !visible);
        }
    }
}

fn open_folder(app: &mut LightboxApp) {
    let tx = app.events_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            let _ = tx.send(AppEvent::FolderPicked { path });
        }
    });
}

fn import_settings(app: &mut LightboxApp) {
    let tx = app.events_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let event = match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| TraySettings::from_toml(&content).map_err(|e| e.to_string()))
        {
            Ok(settings) => AppEvent::SettingsImported { settings },
            Err(e) => AppEvent::Log {
                message: format!("ERROR: cannot import {}: {e}", path.display()),
            },
        };
        let _ = tx.send(event);
    });
}

fn export_settings(app: &mut LightboxApp) {
    let content = match app.tray.settings().to_toml() {
        Ok(content) => content,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let tx = app.events_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("lightbox_settings.toml")
            .save_file()
        {
            let message = match std::fs::write(&path, content) {
                Ok(()) => format!("Settings exported to {}", path.display()),
                Err(e) => format!("ERROR: cannot write {}: {e}", path.display()),
            };
            let _ = tx.send(AppEvent::Log { message });
        }
    });
}
