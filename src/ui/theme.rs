//! Visual theme and styling.

use console::Style;

use crate::check::Severity;

/// cmsprobe's visual theme.
#[derive(Debug, Clone)]
pub struct ProbeTheme {
    /// Requirement met (green).
    pub ok: Style,
    /// Unusual setting (cyan).
    pub notice: Style,
    /// Advice for a setup not in use (cyan).
    pub info: Style,
    /// Below recommendation (yellow).
    pub warning: Style,
    /// Requirement not met (red bold).
    pub error: Style,
    /// Headers (bold).
    pub header: Style,
}

impl Default for ProbeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            ok: Style::new().green(),
            notice: Style::new().cyan(),
            info: Style::new().cyan(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            notice: Style::new(),
            info: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
        }
    }

    /// Colored theme when colors are wanted, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn severity(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Ok => &self.ok,
            Severity::Notice => &self.notice,
            Severity::Info => &self.info,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        }
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_has_no_escapes() {
        let theme = ProbeTheme::plain();
        let label = theme.severity(Severity::Error).apply_to("ERROR").to_string();
        assert_eq!(label, "ERROR");
        assert_eq!(theme.format_header("Checks"), "Checks");
    }

    #[test]
    fn colored_labels_keep_text() {
        let theme = ProbeTheme::new();
        for severity in Severity::ALL {
            let label = theme
                .severity(severity)
                .apply_to(severity.label())
                .to_string();
            assert!(label.contains(severity.label()));
        }
    }

    #[test]
    fn forced_colors_wrap_label_in_escape_codes() {
        let theme = ProbeTheme::new();
        let styled = theme.ok.clone().force_styling(true).apply_to("OK").to_string();
        assert!(styled.starts_with("\u{1b}[32m"));
        assert!(styled.contains("OK"));
    }
}
