use std::sync::atomic::{AtomicBool, Ordering};

pub const EYE_COUNT: usize = 2;

/// Shared service state. Owned by the host process; the control window and
/// the supervisor read and flip the flags, everything else is fixed at
/// startup.
#[derive(Debug)]
pub struct ServiceContext {
    pub preferred_remote_port: u16,
    pub hide_ui: bool,
    pub version: String,
    eye_alive: [AtomicBool; EYE_COUNT],
    stop_requested: AtomicBool,
    restart_requested: AtomicBool,
}

impl ServiceContext {
    pub fn new(preferred_remote_port: u16, hide_ui: bool, version: impl Into<String>) -> Self {
        Self {
            preferred_remote_port,
            hide_ui,
            version: version.into(),
            eye_alive: [AtomicBool::new(false), AtomicBool::new(false)],
            stop_requested: AtomicBool::new(false),
            restart_requested: AtomicBool::new(false),
        }
    }

    pub fn eye_alive(&self, eye_id: usize) -> bool {
        self.eye_alive
            .get(eye_id)
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    pub fn set_eye_alive(&self, eye_id: usize, alive: bool) {
        if let Some(flag) = self.eye_alive.get(eye_id) {
            flag.store(alive, Ordering::Relaxed);
        }
    }

    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Relaxed)
    }

    pub fn request_restart(&self) {
        self.restart_requested.store(true, Ordering::Relaxed);
    }

    pub fn restart_requested(&self) -> bool {
        self.restart_requested.load(Ordering::Relaxed)
    }
}
