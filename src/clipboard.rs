use log::warn;

/// Fire-and-forget clipboard access. Implementations report success or
/// failure after the fact; nothing in the view waits on the outcome.
pub trait ClipboardCapability: Send + Sync {
    fn copy_text(&self, text: &str) -> bool;
}

/// Writes through the operating system clipboard.
pub struct SystemClipboard;

impl ClipboardCapability for SystemClipboard {
    fn copy_text(&self, text: &str) -> bool {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                return false;
            }
        };
        match clipboard.set_text(text.to_string()) {
            Ok(()) => true,
            Err(e) => {
                warn!("clipboard write failed: {e}");
                false
            }
        }
    }
}

/// Discards every write. For headless hosts and tests.
pub struct NullClipboard;

impl ClipboardCapability for NullClipboard {
    fn copy_text(&self, _text: &str) -> bool {
        false
    }
}
