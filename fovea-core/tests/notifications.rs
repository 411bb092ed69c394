use fovea_core::notification::{
    Notification, NotificationError, EYE_STOP_GRACE_DELAY, SERVICE_RESTART_DELAY,
};
use std::time::Duration;

#[test]
fn eye_subjects_carry_the_id() {
    assert_eq!(
        Notification::eye_should_start(0).subject(),
        "eye_process.should_start.0"
    );
    assert_eq!(
        Notification::eye_should_stop(1).subject(),
        "eye_process.should_stop.1"
    );
}

#[test]
fn eye_stop_carries_the_grace_delay() {
    let notification = Notification::eye_should_stop(0);
    assert_eq!(
        notification.delay(),
        Some(Duration::from_secs_f64(EYE_STOP_GRACE_DELAY))
    );
    assert_eq!(Notification::eye_should_start(0).delay(), None);
}

#[test]
fn restart_request_is_delayed() {
    let notification = Notification::service_restart();
    assert_eq!(notification.subject(), "service_process.should_start");
    assert_eq!(
        notification.delay(),
        Some(Duration::from_secs_f64(SERVICE_RESTART_DELAY))
    );
}

#[test]
fn heartbeat_rearm_resets_the_delay() {
    let heartbeat = Notification::ui_heartbeat(0.5);
    assert_eq!(heartbeat.delay(), None);

    let rearmed = heartbeat.rearmed();
    assert_eq!(rearmed.subject(), "service_process.ui.should_update");
    assert_eq!(rearmed.delay(), Some(Duration::from_secs_f64(0.5)));
    // re-arming is stable
    assert_eq!(rearmed.rearmed(), rearmed);
}

#[test]
fn records_are_flat_and_round_trip() {
    let original = Notification::eye_should_stop(1);
    let record = original.to_record();
    assert_eq!(record["subject"], "eye_process.should_stop.1");
    assert_eq!(record["eye_id"], 1);
    assert_eq!(record["delay"], 0.2);

    let parsed = Notification::from_record(&record).expect("parse record");
    assert_eq!(parsed, original);
}

#[test]
fn heartbeat_record_round_trips() {
    let original = Notification::ui_heartbeat(0.1).rearmed();
    let record = original.to_record();
    assert_eq!(record["initial_delay"], 0.1);
    assert_eq!(record["delay"], 0.1);
    assert_eq!(
        Notification::from_record(&record).expect("parse record"),
        original
    );
}

#[test]
fn bare_subjects_round_trip() {
    for notification in [
        Notification::ClearSettingsShouldStart,
        Notification::ServiceShouldStop,
        Notification::service_restart(),
    ] {
        let parsed =
            Notification::from_record(&notification.to_record()).expect("parse record");
        assert_eq!(parsed, notification);
    }
}

#[test]
fn unknown_subject_is_rejected() {
    let record = serde_json::json!({ "subject": "mystery.should_frob" });
    assert_eq!(
        Notification::from_record(&record),
        Err(NotificationError::UnknownSubject(
            "mystery.should_frob".to_string()
        ))
    );
}

#[test]
fn subjectless_record_is_rejected() {
    let record = serde_json::json!({ "delay": 1.0 });
    assert_eq!(
        Notification::from_record(&record),
        Err(NotificationError::MissingSubject)
    );
}

#[test]
fn heartbeat_without_initial_delay_is_rejected() {
    let record = serde_json::json!({ "subject": "service_process.ui.should_update" });
    assert!(Notification::from_record(&record).is_err());
}

#[test]
fn eye_id_falls_back_to_the_subject_suffix() {
    let record = serde_json::json!({ "subject": "eye_process.should_start.1" });
    assert_eq!(
        Notification::from_record(&record).expect("parse record"),
        Notification::eye_should_start(1)
    );
}
