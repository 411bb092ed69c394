use crate::scale::GUI_SCALE_CHOICES;
use crate::service_ui::ServiceUi;
use fovea_core::context::EYE_COUNT;

/// Menu interactions collected during a frame, applied once drawing is over.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent {
    SetScale(f32),
    ResetWindowSize,
    ToggleEye { eye_id: usize, alive: bool },
    RestartWithDefaults,
}

/// Draws the settings menu. Widgets only; the plugin applies the returned
/// events against the window and the bus.
pub fn settings_menu(ui: &mut egui::Ui, service: &ServiceUi, remote_addr: &str) -> Vec<MenuEvent> {
    let mut events = Vec::new();

    ui.heading("Settings");
    ui.separator();

    let current = service.user_scale();
    let mut picked = None;
    egui::ComboBox::from_label("Interface size")
        .selected_text(format!("{current:.1}"))
        .show_ui(ui, |ui| {
            for choice in GUI_SCALE_CHOICES {
                if ui
                    .selectable_label(choice == current, format!("{choice:.1}"))
                    .clicked()
                {
                    picked = Some(choice);
                }
            }
        });
    if let Some(choice) = picked {
        // the setter runs even for the current value; its no-op guard absorbs it
        events.push(MenuEvent::SetScale(choice));
    }

    if ui.button("Reset window size").clicked() {
        events.push(MenuEvent::ResetWindowSize);
    }

    ui.horizontal(|ui| {
        ui.label("Remote address:");
        ui.monospace(remote_addr);
    });

    for eye_id in 0..EYE_COUNT {
        let mut alive = service.context().eye_alive(eye_id);
        if ui
            .checkbox(&mut alive, format!("Detect eye {eye_id}"))
            .changed()
        {
            events.push(MenuEvent::ToggleEye { eye_id, alive });
        }
    }

    ui.label(format!("Service version: {}", service.context().version));

    if ui.button("Restart with default settings").clicked() {
        events.push(MenuEvent::RestartWithDefaults);
    }

    events
}

/// Address shown for the remote control interface. The UDP connect never
/// sends a packet; it only asks the OS which local address routes out.
pub fn local_remote_addr(port: u16) -> String {
    let ip = std::net::UdpSocket::bind(("0.0.0.0", 0))
        .and_then(|socket| {
            socket.connect(("8.8.8.8", 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{ip}:{port}")
}
