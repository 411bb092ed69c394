use crate::supervisor::Supervisor;
use fovea_core::bus::{BusHandle, NotificationBus};
use fovea_core::context::ServiceContext;
use fovea_core::notification::Notification;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Interval between UI repaint heartbeats, in seconds. The GUI echoes each
/// heartbeat back with this delay, so the loop sustains itself.
pub const UI_HEARTBEAT_DELAY: f64 = 0.1;

const IDLE_WAIT: Duration = Duration::from_millis(250);

/// A running bus thread. Keep the handle around to publish; `shutdown` waits
/// for the queue to drain.
pub struct BusTask {
    pub handle: BusHandle,
    thread: JoinHandle<()>,
}

impl BusTask {
    /// Drops the publishing side and waits for the bus thread to finish
    /// delivering what is still queued.
    pub fn shutdown(self) {
        drop(self.handle);
        let _ = self.thread.join();
    }
}

/// Spawns the notification bus thread and seeds the repaint heartbeat.
///
/// The thread routes due notifications: lifecycle requests go to the
/// supervisor, UI subjects are forwarded to the returned receiver. It ends
/// once a stop was requested and the delay queue has drained, or when every
/// handle is gone.
pub fn spawn_bus(
    context: Arc<ServiceContext>,
    session_file: PathBuf,
) -> Result<(BusTask, Receiver<Notification>), String> {
    let (handle, mut bus) = NotificationBus::channel();
    let (ui_tx, ui_rx) = mpsc::channel();

    let thread_context = context.clone();
    let thread = thread::Builder::new()
        .name("fovea-bus".to_string())
        .spawn(move || {
            let supervisor = Supervisor::new(thread_context.clone(), session_file);
            loop {
                let now = Instant::now();
                for notification in bus.pump(now) {
                    match notification {
                        heartbeat @ Notification::UiShouldUpdate { .. } => {
                            // A GUI that is gone simply stops the heartbeat.
                            let _ = ui_tx.send(heartbeat);
                        }
                        request => supervisor.handle(&request),
                    }
                }
                if bus.is_disconnected() && !bus.has_pending() {
                    break;
                }
                if thread_context.stop_requested() && !bus.has_pending() {
                    break;
                }
                let timeout = bus
                    .next_deadline()
                    .map(|deadline| deadline.saturating_duration_since(now))
                    .unwrap_or(IDLE_WAIT);
                bus.wait(timeout);
            }
        })
        .map_err(|e| format!("Failed to spawn bus thread: {e}"))?;

    handle.publish(Notification::ui_heartbeat(UI_HEARTBEAT_DELAY));

    Ok((BusTask { handle, thread }, ui_rx))
}
