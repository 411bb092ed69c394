pub mod bus;
pub mod context;
pub mod notification;
pub mod session;

pub use bus::{BusHandle, NotificationBus};
pub use context::{ServiceContext, EYE_COUNT};
pub use notification::{Notification, NotificationError, EYE_STOP_GRACE_DELAY, SERVICE_RESTART_DELAY};
pub use session::SessionSettings;
