use linkshort_redirect::{Clipboard, ClipboardError};

/// The desktop clipboard.
///
/// A fresh handle is opened for every write, so a headless session only
/// fails the copy instead of the whole command. Without the `clipboard`
/// feature every write reports [`ClipboardError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    #[cfg(feature = "clipboard")]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }

    #[cfg(not(feature = "clipboard"))]
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "built without clipboard support".to_string(),
        ))
    }
}
