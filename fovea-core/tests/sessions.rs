use fovea_core::session::{self, SessionSettings, WINDOW_POSITION_DEFAULT, WINDOW_SIZE_DEFAULT};

#[test]
fn defaults_apply_on_first_run() {
    let settings = SessionSettings::default();
    assert_eq!(settings.window_position, WINDOW_POSITION_DEFAULT);
    assert_eq!(settings.window_size, Some(WINDOW_SIZE_DEFAULT));
    assert_eq!(settings.gui_scale, 1.0);
    assert!(settings.ui_config.as_object().is_some_and(|o| o.is_empty()));
}

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    let settings = SessionSettings {
        window_position: (12, 34),
        window_size: Some((640, 480)),
        gui_scale: 1.2,
        ui_config: serde_json::json!({ "menu_open": true }),
    };

    session::save_session_file(&path, &settings).expect("save session");
    let loaded = session::load_session_file(&path).expect("load session");
    assert_eq!(loaded, settings);
}

#[test]
fn missing_window_size_survives_the_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    let settings = SessionSettings {
        window_size: None,
        ..SessionSettings::default()
    };

    session::save_session_file(&path, &settings).expect("save session");
    let loaded = session::load_session_file(&path).expect("load session");
    assert_eq!(loaded.window_size, None);
}

#[test]
fn clear_removes_the_file_and_tolerates_absence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    session::save_session_file(&path, &SessionSettings::default()).expect("save session");
    assert!(path.exists());

    session::clear_session_file(&path).expect("clear session");
    assert!(!path.exists());
    session::clear_session_file(&path).expect("clear absent session");
}

#[test]
fn corrupt_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    std::fs::write(&path, b"not json").expect("write file");

    let err = session::load_session_file(&path).expect_err("corrupt file");
    assert!(err.contains("parse"));
}

#[test]
fn non_positive_scale_is_not_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    let settings = SessionSettings {
        gui_scale: 0.0,
        ..SessionSettings::default()
    };
    assert!(session::save_session_file(&path, &settings).is_err());
    assert!(!path.exists());
}

#[test]
fn zero_window_size_is_not_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = session::session_file_path(dir.path());
    let settings = SessionSettings {
        window_size: Some((0, 400)),
        ..SessionSettings::default()
    };
    assert!(session::save_session_file(&path, &settings).is_err());
}
