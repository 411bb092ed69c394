pub mod pump;
pub mod supervisor;

pub use pump::{spawn_bus, BusTask, UI_HEARTBEAT_DELAY};
pub use supervisor::Supervisor;
