use fovea_core::context::ServiceContext;
use fovea_core::notification::Notification;
use fovea_core::session;
use std::path::PathBuf;
use std::sync::Arc;

/// Host-side accounting for lifecycle requests. Eye processes are tracked as
/// alive flags on the shared context; the actual camera subprocesses belong
/// to the host integration, not to this crate.
pub struct Supervisor {
    context: Arc<ServiceContext>,
    session_file: PathBuf,
}

impl Supervisor {
    pub fn new(context: Arc<ServiceContext>, session_file: PathBuf) -> Self {
        Self {
            context,
            session_file,
        }
    }

    pub fn handle(&self, notification: &Notification) {
        match notification {
            Notification::EyeShouldStart { eye_id } => {
                log::info!("Starting eye process {eye_id}");
                self.context.set_eye_alive(*eye_id, true);
            }
            Notification::EyeShouldStop { eye_id, .. } => {
                log::info!("Stopping eye process {eye_id}");
                self.context.set_eye_alive(*eye_id, false);
            }
            Notification::ClearSettingsShouldStart => {
                log::warn!("Clearing persisted session settings");
                if let Err(err) = session::clear_session_file(&self.session_file) {
                    log::error!("{err}");
                }
            }
            Notification::ServiceShouldStart { .. } => {
                self.context.request_restart();
            }
            Notification::ServiceShouldStop => {
                self.context.request_stop();
            }
            Notification::UiShouldUpdate { .. } => {}
        }
    }
}
