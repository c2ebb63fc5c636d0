use crate::errors::PlaceClipError;
use arboard::Clipboard;
use tracing::{debug, trace};

/// Destination for exported text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<(), PlaceClipError>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, PlaceClipError> {
        debug!("Initializing clipboard");
        let clipboard =
            Clipboard::new().map_err(|e| PlaceClipError::ClipboardInitError(e.to_string()))?;
        Ok(SystemClipboard { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), PlaceClipError> {
        trace!("Writing {} bytes to clipboard", text.len());
        self.clipboard
            .set_text(text)
            .map_err(|e| PlaceClipError::ClipboardWriteError(e.to_string()))
    }
}

/// Writes the text to standard output instead of the clipboard.
pub struct StdoutSink;

impl ClipboardSink for StdoutSink {
    fn set_text(&mut self, text: String) -> Result<(), PlaceClipError> {
        println!("{}", text);
        Ok(())
    }
}
