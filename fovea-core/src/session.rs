use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Baseline window size before any display scaling is applied.
pub const WINDOW_SIZE_DEFAULT: (u32, u32) = (400, 400);

#[cfg(target_os = "linux")]
pub const WINDOW_POSITION_DEFAULT: (i32, i32) = (30, 30);
#[cfg(target_os = "windows")]
pub const WINDOW_POSITION_DEFAULT: (i32, i32) = (8, 90);
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
pub const WINDOW_POSITION_DEFAULT: (i32, i32) = (0, 0);

pub const SESSION_FILE_NAME: &str = "service_session.json";

/// Snapshot of the control window's configuration, persisted between runs so
/// a restarted service comes up where the last one left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub window_position: (i32, i32),
    /// Absent when the window reported a zero dimension at snapshot time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<(u32, u32)>,
    pub gui_scale: f32,
    /// Widget-system state, round-tripped without inspection.
    #[serde(default)]
    pub ui_config: Value,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            window_position: WINDOW_POSITION_DEFAULT,
            window_size: Some(WINDOW_SIZE_DEFAULT),
            gui_scale: 1.0,
            ui_config: Value::Object(serde_json::Map::new()),
        }
    }
}

pub fn session_file_path(dir: &Path) -> PathBuf {
    dir.join(SESSION_FILE_NAME)
}

fn validate_session(settings: &SessionSettings) -> Result<(), String> {
    if !(settings.gui_scale > 0.0) {
        return Err(format!(
            "gui_scale must be positive, got {}",
            settings.gui_scale
        ));
    }
    if let Some((width, height)) = settings.window_size {
        if width == 0 || height == 0 {
            return Err(format!("window_size must be non-zero, got {width}x{height}"));
        }
    }
    Ok(())
}

pub fn load_session_file(path: &Path) -> Result<SessionSettings, String> {
    let data = std::fs::read(path).map_err(|e| {
        format!("Failed to read session file '{}': {e}", path.display())
    })?;
    let settings: SessionSettings = serde_json::from_slice(&data).map_err(|e| {
        format!("Failed to parse session file '{}': {e}", path.display())
    })?;
    validate_session(&settings)?;
    Ok(settings)
}

pub fn save_session_file(path: &Path, settings: &SessionSettings) -> Result<(), String> {
    validate_session(settings)?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("Failed to serialize session settings: {e}"))?;
    std::fs::write(path, data).map_err(|e| {
        format!("Failed to write session file '{}': {e}", path.display())
    })
}

/// Removes the persisted session. A file that is already gone is fine.
pub fn clear_session_file(path: &Path) -> Result<(), String> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(format!(
            "Failed to remove session file '{}': {err}",
            path.display()
        )),
    }
}
