use serde_json::{Map, Value};
use std::time::Duration;

/// Delay before a fresh service instance is brought up after a
/// restart-with-defaults request, in seconds.
pub const SERVICE_RESTART_DELAY: f64 = 2.0;

/// Grace period before an eye process is actually stopped, in seconds.
/// A rapid off/on must not race a teardown against its own startup.
pub const EYE_STOP_GRACE_DELAY: f64 = 0.2;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification record has no subject")]
    MissingSubject,
    #[error("unknown notification subject '{0}'")]
    UnknownSubject(String),
    #[error("notification '{subject}' is missing field '{field}'")]
    MissingField { subject: String, field: String },
}

/// A message on the service notification bus. On the wire every notification
/// is a flat key/value record keyed by its `subject` string; see
/// [`Notification::to_record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Request a wipe of all persisted settings.
    ClearSettingsShouldStart,
    /// Request a fresh service instance after `delay` seconds.
    ServiceShouldStart { delay: f64 },
    /// The control window closed; the host should exit.
    ServiceShouldStop,
    /// Start the eye-camera process for `eye_id`.
    EyeShouldStart { eye_id: usize },
    /// Stop the eye-camera process for `eye_id` after `delay` seconds.
    EyeShouldStop { eye_id: usize, delay: f64 },
    /// Repaint heartbeat. The control window echoes it back with `delay`
    /// reset to `initial_delay`, keeping the repaint loop alive.
    UiShouldUpdate { initial_delay: f64, delay: Option<f64> },
}

impl Notification {
    pub fn eye_should_start(eye_id: usize) -> Self {
        Notification::EyeShouldStart { eye_id }
    }

    pub fn eye_should_stop(eye_id: usize) -> Self {
        Notification::EyeShouldStop {
            eye_id,
            delay: EYE_STOP_GRACE_DELAY,
        }
    }

    pub fn service_restart() -> Self {
        Notification::ServiceShouldStart {
            delay: SERVICE_RESTART_DELAY,
        }
    }

    pub fn ui_heartbeat(initial_delay: f64) -> Self {
        Notification::UiShouldUpdate {
            initial_delay,
            delay: None,
        }
    }

    /// The subject string. Eye subjects carry the eye id as a suffix.
    pub fn subject(&self) -> String {
        match self {
            Notification::ClearSettingsShouldStart => {
                "clear_settings_process.should_start".to_string()
            }
            Notification::ServiceShouldStart { .. } => "service_process.should_start".to_string(),
            Notification::ServiceShouldStop => "service_process.should_stop".to_string(),
            Notification::EyeShouldStart { eye_id } => {
                format!("eye_process.should_start.{eye_id}")
            }
            Notification::EyeShouldStop { eye_id, .. } => {
                format!("eye_process.should_stop.{eye_id}")
            }
            Notification::UiShouldUpdate { .. } => "service_process.ui.should_update".to_string(),
        }
    }

    /// Delivery delay, if the notification carries one.
    pub fn delay(&self) -> Option<Duration> {
        let seconds = match self {
            Notification::ServiceShouldStart { delay } => Some(*delay),
            Notification::EyeShouldStop { delay, .. } => Some(*delay),
            Notification::UiShouldUpdate { delay, .. } => *delay,
            _ => None,
        };
        seconds.filter(|s| *s > 0.0).map(Duration::from_secs_f64)
    }

    /// The echoed copy of a heartbeat: delivery delay reset to the configured
    /// initial delay. Any other notification is returned unchanged.
    pub fn rearmed(&self) -> Notification {
        match self {
            Notification::UiShouldUpdate { initial_delay, .. } => Notification::UiShouldUpdate {
                initial_delay: *initial_delay,
                delay: Some(*initial_delay),
            },
            other => other.clone(),
        }
    }

    /// The flat key/value record carried on the bus.
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("subject".to_string(), Value::from(self.subject()));
        match self {
            Notification::ServiceShouldStart { delay } => {
                record.insert("delay".to_string(), Value::from(*delay));
            }
            Notification::EyeShouldStart { eye_id } => {
                record.insert("eye_id".to_string(), Value::from(*eye_id));
            }
            Notification::EyeShouldStop { eye_id, delay } => {
                record.insert("eye_id".to_string(), Value::from(*eye_id));
                record.insert("delay".to_string(), Value::from(*delay));
            }
            Notification::UiShouldUpdate {
                initial_delay,
                delay,
            } => {
                record.insert("initial_delay".to_string(), Value::from(*initial_delay));
                if let Some(delay) = delay {
                    record.insert("delay".to_string(), Value::from(*delay));
                }
            }
            _ => {}
        }
        Value::Object(record)
    }

    pub fn from_record(record: &Value) -> Result<Self, NotificationError> {
        let subject = record
            .get("subject")
            .and_then(|v| v.as_str())
            .ok_or(NotificationError::MissingSubject)?;
        let delay = record.get("delay").and_then(|v| v.as_f64());

        if subject == "clear_settings_process.should_start" {
            return Ok(Notification::ClearSettingsShouldStart);
        }
        if subject == "service_process.should_start" {
            return Ok(Notification::ServiceShouldStart {
                delay: delay.unwrap_or(0.0),
            });
        }
        if subject == "service_process.should_stop" {
            return Ok(Notification::ServiceShouldStop);
        }
        if subject == "service_process.ui.should_update" {
            let initial_delay = record
                .get("initial_delay")
                .and_then(|v| v.as_f64())
                .ok_or_else(|| NotificationError::MissingField {
                    subject: subject.to_string(),
                    field: "initial_delay".to_string(),
                })?;
            return Ok(Notification::UiShouldUpdate {
                initial_delay,
                delay,
            });
        }
        if let Some(suffix) = subject.strip_prefix("eye_process.should_start.") {
            let eye_id = eye_id_from(record, subject, suffix)?;
            return Ok(Notification::EyeShouldStart { eye_id });
        }
        if let Some(suffix) = subject.strip_prefix("eye_process.should_stop.") {
            let eye_id = eye_id_from(record, subject, suffix)?;
            return Ok(Notification::EyeShouldStop {
                eye_id,
                delay: delay.unwrap_or(0.0),
            });
        }
        Err(NotificationError::UnknownSubject(subject.to_string()))
    }
}

fn eye_id_from(record: &Value, subject: &str, suffix: &str) -> Result<usize, NotificationError> {
    record
        .get("eye_id")
        .and_then(|v| v.as_u64())
        .map(|id| id as usize)
        .or_else(|| suffix.parse().ok())
        .ok_or_else(|| NotificationError::MissingField {
            subject: subject.to_string(),
            field: "eye_id".to_string(),
        })
}
