//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Like the terminal UI it drops
//! banners and success notes in quiet mode.
//!
//! # Example
//!
//! ```
//! use cmsprobe::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("rule-a  Rule A");
//! ui.success("Snapshot written");
//!
//! assert!(ui.messages().contains(&"rule-a  Rule A".to_string()));
//! assert!(ui.successes().contains(&"Snapshot written".to_string()));
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if any captured output contains the given text.
    pub fn has_output(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.headers)
            .any(|line| line.contains(text))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_banners() {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_banners() {
            self.headers.push(title.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_in_normal_mode() {
        let mut ui = MockUI::new();
        ui.show_header("TYPO3 CMS");
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        assert_eq!(ui.headers(), ["TYPO3 CMS".to_string()]);
        assert_eq!(ui.messages(), ["hello".to_string()]);
        assert!(ui.has_output("careful"));
        assert!(ui.has_output("broken"));
    }

    #[test]
    fn quiet_mode_drops_banners() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.show_header("TYPO3 CMS");
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");
        assert!(ui.headers().is_empty());
        assert!(ui.successes().is_empty());
        assert_eq!(ui.messages(), ["hello".to_string()]);
        assert_eq!(ui.warnings().len(), 1);
        assert_eq!(ui.errors().len(), 1);
    }
}
