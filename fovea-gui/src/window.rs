use fovea_core::session::{WINDOW_POSITION_DEFAULT, WINDOW_SIZE_DEFAULT};

/// Seam between the control logic and the windowing backend. Sizes and
/// positions are in the backend's window units ("screen coordinates").
pub trait WindowOps {
    fn size(&self) -> (u32, u32);
    fn position(&self) -> (i32, i32);
    fn set_size(&mut self, width: u32, height: u32);
    /// OS-reported display scale for the monitor the window sits on.
    fn content_scale(&self) -> f32;
    /// Backing-store pixel density, distinct from the content scale.
    fn framebuffer_scale(&self) -> f32;
    /// Push a recomputed effective scale into the widget system.
    fn apply_scale(&mut self, effective_scale: f32);
    fn request_close(&mut self);
    fn close_requested(&self) -> bool;
}

/// egui viewport implementation. egui works in logical points; on Windows and
/// Linux screen coordinates are points times the native pixels-per-point.
pub struct EframeWindow<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EframeWindow<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }

    fn screen_scale(&self) -> f32 {
        if cfg!(any(target_os = "windows", target_os = "linux")) {
            self.content_scale()
        } else {
            1.0
        }
    }
}

impl WindowOps for EframeWindow<'_> {
    fn size(&self) -> (u32, u32) {
        let scale = self.screen_scale();
        self.ctx.input(|i| {
            i.viewport()
                .inner_rect
                .map(|rect| {
                    (
                        (rect.width() * scale).round() as u32,
                        (rect.height() * scale).round() as u32,
                    )
                })
                .unwrap_or(WINDOW_SIZE_DEFAULT)
        })
    }

    fn position(&self) -> (i32, i32) {
        let scale = self.screen_scale();
        self.ctx.input(|i| {
            i.viewport()
                .outer_rect
                .map(|rect| {
                    (
                        (rect.min.x * scale).round() as i32,
                        (rect.min.y * scale).round() as i32,
                    )
                })
                .unwrap_or(WINDOW_POSITION_DEFAULT)
        })
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let scale = self.screen_scale();
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                width as f32 / scale,
                height as f32 / scale,
            )));
    }

    fn content_scale(&self) -> f32 {
        self.ctx
            .input(|i| i.viewport().native_pixels_per_point)
            .unwrap_or(1.0)
    }

    fn framebuffer_scale(&self) -> f32 {
        // egui's backing store follows the native pixels-per-point.
        self.content_scale()
    }

    fn apply_scale(&mut self, effective_scale: f32) {
        self.ctx.set_pixels_per_point(effective_scale);
    }

    fn request_close(&mut self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn close_requested(&self) -> bool {
        self.ctx.input(|i| i.viewport().close_requested())
    }
}
