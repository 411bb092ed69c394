use fovea_core::session::WINDOW_SIZE_DEFAULT;

/// Discrete interface-size multipliers offered in the settings menu.
pub const GUI_SCALE_CHOICES: [f32; 5] = [0.6, 0.8, 1.0, 1.2, 1.4];

/// Scale pushed into the widget system: user preference times the monitor's
/// content scale.
pub fn effective_scale(user_scale: f32, content_scale: f32) -> f32 {
    user_scale * content_scale
}

/// Target for "reset window size": the baseline window scaled by the
/// content/framebuffer ratio. The ratio corrects for HiDPI backing-store
/// scaling, which is distinct from the user-facing content scale.
pub fn default_window_size(content_scale: f32, framebuffer_scale: f32) -> (u32, u32) {
    let ratio = content_scale / framebuffer_scale;
    let (width, height) = WINDOW_SIZE_DEFAULT;
    (
        (width as f32 * ratio).round() as u32,
        (height as f32 * ratio).round() as u32,
    )
}

/// Window size as persisted in a session snapshot. Zero dimensions are never
/// persisted; on Windows and Linux the stored size is divided by the content
/// scale, matching what window creation expects there.
pub fn session_window_size(size: (u32, u32), content_scale: f32) -> Option<(u32, u32)> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return None;
    }
    if cfg!(any(target_os = "windows", target_os = "linux")) {
        Some((
            (width as f32 / content_scale) as u32,
            (height as f32 / content_scale) as u32,
        ))
    } else {
        Some((width, height))
    }
}
