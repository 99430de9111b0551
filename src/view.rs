//! DOM-free view model. A page is a set of [`Region`]s (replaceable HTML
//! containers) and [`Control`]s (buttons), plus two side channels: blocking
//! notices ([`Notifier`]) and the clipboard ([`Clipboard`]).

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Region {
    html: String,
}

impl Region {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn set(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Control {
    pub enabled: bool,
    /// Request in flight; shown dimmed.
    pub busy: bool,
}

impl Control {
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            busy: false,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            busy: false,
        }
    }

    pub fn start_busy(&mut self) {
        self.enabled = false;
        self.busy = true;
    }

    pub fn settle(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.busy = false;
    }
}

/// Blocking user-facing notices (validation failures, copy/save results).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Collects notices; used by the desktop shell to hand them to the webview.
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_busy_cycle() {
        let mut control = Control::enabled();
        control.start_busy();
        assert_eq!(control, Control { enabled: false, busy: true });
        control.settle(true);
        assert_eq!(control, Control::enabled());
    }

    #[test]
    fn test_region_serializes_as_html() {
        let mut region = Region::default();
        region.set("<p>x</p>");
        assert_eq!(serde_json::to_string(&region).unwrap(), "\"<p>x</p>\"");
    }
}
