/// Clipboard seam. A host that reports no clipboard content reads as the
/// empty string; that is the only recognized failure and it stays local.
pub trait ClipboardOps {
    fn read(&mut self) -> String;
    fn write(&mut self, text: &str);
}

/// System clipboard via arboard. Construction failure degrades to an
/// always-empty clipboard.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::warn!("Clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardOps for SystemClipboard {
    fn read(&mut self) -> String {
        self.inner
            .as_mut()
            .and_then(|clipboard| clipboard.get_text().ok())
            .unwrap_or_default()
    }

    fn write(&mut self, text: &str) {
        if let Some(clipboard) = self.inner.as_mut() {
            if let Err(err) = clipboard.set_text(text.to_string()) {
                log::warn!("Failed to write clipboard: {err}");
            }
        }
    }
}
