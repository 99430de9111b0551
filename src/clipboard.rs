use crate::view::{Clipboard, ClipboardError};
use base64::Engine;
use std::io::Write;

/// The OS clipboard. Opened lazily and kept open: on X11 the selection is
/// served by this process, so dropping the handle drops the contents.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let handle =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(handle);
        }
        match self.inner.as_mut() {
            Some(cb) => cb
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::Write(e.to_string())),
            None => Err(ClipboardError::Unavailable("no clipboard handle".into())),
        }
    }
}

/// Terminal clipboard via the OSC 52 escape sequence. Works over SSH and in
/// headless sessions where no OS clipboard is reachable.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stderr> {
    /// Writes to stderr so the sequence reaches the terminal even when stdout is piped.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload)
            .and_then(|_| self.out.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Writes every copy to both clipboards and succeeds if either accepts it.
/// The CLI exits right after copying, which drops an X11 or Wayland
/// selection, so it mirrors into the terminal as well.
pub struct Mirrored<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Clipboard, B: Clipboard> Mirrored<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: Clipboard, B: Clipboard> Clipboard for Mirrored<A, B> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let primary = self.primary.write_text(text);
        let secondary = self.secondary.write_text(text);
        if let Err(e) = &primary {
            tracing::debug!(error = %e, "Primary clipboard rejected text");
        }
        match (primary, secondary) {
            (Ok(()), _) | (_, Ok(())) => Ok(()),
            (Err(e), Err(_)) => Err(e),
        }
    }
}
