use lightbox_core::drag::MotionCapture;
use lightbox_core::error::Result;

/// Pointer capture through winit cursor grabbing.
///
/// The platform does not report whether the grab succeeded, so the app
/// treats a sent request as granted and reports loss on focus change or
/// button release.
pub struct CursorGrab {
    ctx: egui::Context,
    grabbed: bool,
}

impl CursorGrab {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            grabbed: false,
        }
    }
}

impl MotionCapture for CursorGrab {
    fn request_capture(&mut self) -> Result<()> {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::CursorGrab(
            egui::viewport::CursorGrab::Locked,
        ));
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::CursorVisible(false));
        self.grabbed = true;
        Ok(())
    }

    fn release_capture(&mut self) {
        if !self.grabbed {
            return;
        }
        self.ctx.send_viewport_cmd(egui::ViewportCommand::CursorGrab(
            egui::viewport::CursorGrab::None,
        ));
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::CursorVisible(true));
        self.grabbed = false;
    }
}
