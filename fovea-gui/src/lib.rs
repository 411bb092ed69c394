use fovea_core::bus::BusHandle;
use fovea_core::context::ServiceContext;
use fovea_core::notification::Notification;
use fovea_core::session::SessionSettings;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub mod clipboard;
pub mod panel;
pub mod scale;
pub mod service_ui;
pub mod window;

use clipboard::SystemClipboard;
use panel::MenuEvent;
use service_ui::{ServiceUi, UiPass};
use window::{EframeWindow, WindowOps};

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Fovea Service".to_string(),
            width: 400.0,
            height: 400.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Runs the control window until it is closed.
///
/// The window comes up with the session's geometry and scale, stays hidden
/// when the context asks for that, and publishes its lifecycle notifications
/// on `bus`. `notifications` carries the UI-addressed subjects forwarded by
/// the bus thread. The latest session snapshot is kept in `snapshot_out` for
/// the host to persist after the window is gone.
pub fn run_gui(
    config: GuiConfig,
    session: SessionSettings,
    context: Arc<ServiceContext>,
    bus: BusHandle,
    notifications: Receiver<Notification>,
    snapshot_out: Arc<Mutex<SessionSettings>>,
) -> Result<(), GuiError> {
    let (width, height) = session
        .window_size
        .map(|(w, h)| (w as f32, h as f32))
        .unwrap_or((config.width, config.height));
    let (x, y) = session.window_position;

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([width, height])
        .with_position([x as f32, y as f32]);
    if context.hide_ui {
        viewport = viewport.with_visible(false);
    }
    let mut options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    // NOTE: Vsync generates hangs and lag on occluded windows.
    options.vsync = false;

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| {
            Box::new(ServiceApp::new(
                bus,
                context,
                session,
                notifications,
                snapshot_out,
            ))
        }),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}

struct ServiceApp {
    service: ServiceUi,
    clipboard: SystemClipboard,
    notifications: Receiver<Notification>,
    snapshot_out: Arc<Mutex<SessionSettings>>,
    remote_addr: String,
    texture: Option<egui::TextureHandle>,
    known_size: Option<(u32, u32)>,
    heartbeat: Duration,
}

impl ServiceApp {
    fn new(
        bus: BusHandle,
        context: Arc<ServiceContext>,
        session: SessionSettings,
        notifications: Receiver<Notification>,
        snapshot_out: Arc<Mutex<SessionSettings>>,
    ) -> Self {
        let remote_addr = panel::local_remote_addr(context.preferred_remote_port);
        let service = ServiceUi::new(bus, context, &session);
        Self {
            service,
            clipboard: SystemClipboard::new(),
            notifications,
            snapshot_out,
            remote_addr,
            texture: None,
            known_size: None,
            heartbeat: Duration::from_millis(100),
        }
    }

    /// The 1x1 mid-gray placeholder; the only thing the window ever draws.
    fn placeholder_texture(&mut self, ctx: &egui::Context) -> egui::TextureHandle {
        self.texture
            .get_or_insert_with(|| {
                ctx.load_texture(
                    "placeholder",
                    egui::ColorImage::new([1, 1], egui::Color32::from_gray(128)),
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone()
    }
}

impl eframe::App for ServiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut window = EframeWindow::new(ctx);
        let mut pass = UiPass::Drawn;

        let size = window.size();
        if self.known_size != Some(size) {
            self.known_size = Some(size);
            pass = self
                .service
                .on_resize(&mut window, &mut self.clipboard, size.0, size.1);
        }

        while let Ok(notification) = self.notifications.try_recv() {
            if let Notification::UiShouldUpdate { initial_delay, .. } = notification {
                self.heartbeat = Duration::from_secs_f64(initial_delay);
            }
            if let Some(result) =
                self.service
                    .on_notify(&mut window, &mut self.clipboard, &notification)
            {
                pass = result;
            }
        }

        if pass == UiPass::Drawn {
            pass = self.service.update_ui(&mut window, &mut self.clipboard);
        }
        ctx.request_repaint_after(self.heartbeat);

        if pass == UiPass::Stopping {
            return;
        }

        let texture = self.placeholder_texture(ctx);
        let mut events = Vec::new();
        egui::SidePanel::left("settings_menu")
            .default_width(260.0)
            .show(ctx, |ui| {
                events.extend(panel::settings_menu(ui, &self.service, &self.remote_addr));
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.painter().image(
                texture.id(),
                ui.max_rect(),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        });

        for event in events {
            match event {
                MenuEvent::SetScale(new_scale) => {
                    self.service
                        .set_scale(&mut window, &mut self.clipboard, new_scale);
                }
                MenuEvent::ResetWindowSize => self.service.reset_window_size(&mut window),
                MenuEvent::ToggleEye { eye_id, alive } => {
                    self.service.start_stop_eye(eye_id, alive)
                }
                MenuEvent::RestartWithDefaults => {
                    self.service.restart_with_defaults(&mut window)
                }
            }
        }

        let produced = ctx.output_mut(|output| std::mem::take(&mut output.copied_text));
        self.service.push_clipboard(&mut self.clipboard, &produced);

        if let Ok(mut snapshot) = self.snapshot_out.lock() {
            *snapshot = self.service.session_snapshot(&window);
        }
    }
}
