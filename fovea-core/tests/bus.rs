use fovea_core::bus::NotificationBus;
use fovea_core::notification::Notification;
use std::time::{Duration, Instant};

#[test]
fn publication_order_is_preserved() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::ClearSettingsShouldStart);
    handle.publish(Notification::ServiceShouldStop);
    handle.publish(Notification::eye_should_start(0));

    let due = bus.pump(Instant::now());
    assert_eq!(
        due,
        vec![
            Notification::ClearSettingsShouldStart,
            Notification::ServiceShouldStop,
            Notification::eye_should_start(0),
        ]
    );
}

#[test]
fn delayed_delivery_waits_for_the_deadline() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::eye_should_stop(0));

    let now = Instant::now();
    assert!(bus.pump(now).is_empty());
    assert!(bus.has_pending());

    let deadline = bus.next_deadline().expect("deadline");
    assert!(bus.pump(deadline - Duration::from_millis(1)).is_empty());
    assert_eq!(bus.pump(deadline), vec![Notification::eye_should_stop(0)]);
    assert!(!bus.has_pending());
}

#[test]
fn earlier_deadlines_deliver_first() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::service_restart());
    handle.publish(Notification::eye_should_stop(1));

    let now = Instant::now();
    assert!(bus.pump(now).is_empty());
    let due = bus.pump(now + Duration::from_secs(3));
    assert_eq!(
        due,
        vec![
            Notification::eye_should_stop(1),
            Notification::service_restart(),
        ]
    );
}

#[test]
fn restart_sequence_clears_settings_before_the_delayed_start() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::ClearSettingsShouldStart);
    handle.publish(Notification::service_restart());

    let now = Instant::now();
    assert_eq!(bus.pump(now), vec![Notification::ClearSettingsShouldStart]);
    assert_eq!(
        bus.pump(now + Duration::from_secs_f64(2.5)),
        vec![Notification::service_restart()]
    );
}

#[test]
fn wait_buffers_for_the_next_pump() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::ServiceShouldStop);

    bus.wait(Duration::from_millis(10));
    assert!(bus.has_pending());
    assert_eq!(
        bus.pump(Instant::now()),
        vec![Notification::ServiceShouldStop]
    );
}

#[test]
fn disconnect_is_observed_after_the_drain() {
    let (handle, mut bus) = NotificationBus::channel();
    handle.publish(Notification::ServiceShouldStop);
    drop(handle);

    assert_eq!(
        bus.pump(Instant::now()),
        vec![Notification::ServiceShouldStop]
    );
    assert!(bus.is_disconnected());
    assert!(!bus.has_pending());
}

#[test]
fn cloned_handles_publish_to_the_same_bus() {
    let (handle, mut bus) = NotificationBus::channel();
    let other = handle.clone();
    handle.publish(Notification::eye_should_start(0));
    other.publish(Notification::eye_should_start(1));

    let due = bus.pump(Instant::now());
    assert_eq!(
        due,
        vec![
            Notification::eye_should_start(0),
            Notification::eye_should_start(1),
        ]
    );
}
