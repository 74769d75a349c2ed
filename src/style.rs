use inksac::prelude::*;

/// Terminal styling for diagnostics and watcher notifications, degrading
/// to plain text when the terminal reports no color support.
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    color_support: ColorSupport,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStyle {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        message.style(error_style).to_string()
    }

    /// Watcher alerts: mail arrival, tracked-user logins.
    pub fn alert(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let alert_style = Style::builder().foreground(Color::Yellow).bold().build();

        message.style(alert_style).to_string()
    }

    pub fn notice(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let notice_style = Style::builder().foreground(Color::Green).build();

        message.style(notice_style).to_string()
    }
}
