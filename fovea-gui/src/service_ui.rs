use crate::clipboard::ClipboardOps;
use crate::scale::{self, effective_scale};
use crate::window::WindowOps;
use fovea_core::bus::BusHandle;
use fovea_core::context::ServiceContext;
use fovea_core::notification::Notification;
use fovea_core::session::{SessionSettings, WINDOW_SIZE_DEFAULT};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPass {
    /// Content may be drawn this tick.
    Drawn,
    /// A close request has been observed; nothing is drawn and the host was
    /// asked to stop.
    Stopping,
}

/// The control-window plugin: translates window and menu events into
/// lifecycle notifications and keeps the repaint heartbeat alive.
///
/// Two states: running, and close-pending once the window system reported a
/// close request. The transition is one-way; cleanup tears the plugin down.
pub struct ServiceUi {
    bus: BusHandle,
    context: Arc<ServiceContext>,
    window_size: (u32, u32),
    content_scale: f32,
    user_scale: f32,
    ui_config: Value,
    os_clipboard: String,
    close_pending: bool,
}

impl ServiceUi {
    pub fn new(bus: BusHandle, context: Arc<ServiceContext>, session: &SessionSettings) -> Self {
        Self {
            bus,
            context,
            window_size: session.window_size.unwrap_or(WINDOW_SIZE_DEFAULT),
            content_scale: 1.0,
            user_scale: session.gui_scale,
            ui_config: session.ui_config.clone(),
            os_clipboard: String::new(),
            close_pending: false,
        }
    }

    pub fn user_scale(&self) -> f32 {
        self.user_scale
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    pub fn close_pending(&self) -> bool {
        self.close_pending
    }

    /// Clipboard text the widget system sees this tick.
    pub fn os_clipboard(&self) -> &str {
        &self.os_clipboard
    }

    /// Window geometry changed: recompute the widget scale and repaint now
    /// rather than on the next heartbeat, so resizing never shows stale
    /// content.
    pub fn on_resize<W: WindowOps>(
        &mut self,
        window: &mut W,
        clipboard: &mut dyn ClipboardOps,
        width: u32,
        height: u32,
    ) -> UiPass {
        self.window_size = (width, height);
        self.content_scale = window.content_scale();
        window.apply_scale(effective_scale(self.user_scale, self.content_scale));
        self.update_ui(window, clipboard)
    }

    /// The interface-size setter. The selector invokes it with the getter's
    /// own value, so setting the scale already in effect must stay a no-op.
    pub fn set_scale<W: WindowOps>(
        &mut self,
        window: &mut W,
        clipboard: &mut dyn ClipboardOps,
        new_scale: f32,
    ) -> Option<UiPass> {
        let old_scale = self.user_scale;
        self.user_scale = new_scale;
        if old_scale == new_scale {
            return None;
        }
        let (width, height) = self.window_size;
        Some(self.on_resize(window, clipboard, width, height))
    }

    /// Resize the window back to the baseline size, corrected for the
    /// backing-store scale.
    pub fn reset_window_size<W: WindowOps>(&self, window: &mut W) {
        let (width, height) =
            scale::default_window_size(window.content_scale(), window.framebuffer_scale());
        window.set_size(width, height);
    }

    /// Wipe persisted settings and bring up a fresh instance. Clear-settings
    /// goes out before the delayed start so the new instance cannot race
    /// stale settings still being flushed.
    pub fn restart_with_defaults<W: WindowOps>(&mut self, window: &mut W) {
        log::warn!("Resetting all settings and restarting the service.");
        self.bus.publish(Notification::ClearSettingsShouldStart);
        self.bus.publish(Notification::service_restart());
        window.request_close();
    }

    /// Detect-eye switch toggled.
    pub fn start_stop_eye(&self, eye_id: usize, make_alive: bool) {
        if make_alive {
            self.bus.publish(Notification::eye_should_start(eye_id));
        } else {
            self.bus.publish(Notification::eye_should_stop(eye_id));
        }
    }

    /// Bus delivery. A repaint heartbeat is echoed back with its delay reset,
    /// then one render pass runs; everything else is not addressed to us.
    pub fn on_notify<W: WindowOps>(
        &mut self,
        window: &mut W,
        clipboard: &mut dyn ClipboardOps,
        notification: &Notification,
    ) -> Option<UiPass> {
        match notification {
            Notification::UiShouldUpdate { .. } => {
                self.bus.publish(notification.rearmed());
                Some(self.update_ui(window, clipboard))
            }
            _ => None,
        }
    }

    /// One render pass. After a close request has been observed every call
    /// asks the host to stop instead of drawing.
    pub fn update_ui<W: WindowOps>(
        &mut self,
        window: &mut W,
        clipboard: &mut dyn ClipboardOps,
    ) -> UiPass {
        if self.close_pending || window.close_requested() {
            self.close_pending = true;
            self.bus.publish(Notification::ServiceShouldStop);
            return UiPass::Stopping;
        }
        self.os_clipboard = clipboard.read();
        UiPass::Drawn
    }

    /// Write widget-produced clipboard content back, only when it changed.
    pub fn push_clipboard(&self, clipboard: &mut dyn ClipboardOps, produced: &str) {
        if !produced.is_empty() && produced != self.os_clipboard {
            clipboard.write(produced);
        }
    }

    /// Configuration snapshot the host persists for
    /// restart-with-same-settings. Emits nothing.
    pub fn session_snapshot<W: WindowOps>(&self, window: &W) -> SessionSettings {
        SessionSettings {
            window_position: window.position(),
            window_size: scale::session_window_size(window.size(), window.content_scale()),
            gui_scale: self.user_scale,
            ui_config: self.ui_config.clone(),
        }
    }
}
