//! Console-backed terminal UI.

use console::Term;
use std::io::Write;

use super::{OutputMode, ProbeTheme, UserInterface};

/// Terminal UI writing messages to stdout and errors to stderr.
pub struct TerminalUI {
    term: Term,
    err: Term,
    theme: ProbeTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, theme: ProbeTheme) -> Self {
        Self {
            term: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_banners() {
            writeln!(self.term, "{}", self.theme.ok.apply_to(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.warning.apply_to(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.error.apply_to(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_banners() {
            writeln!(self.term, "{}\n", self.theme.format_header(title)).ok();
        }
    }
}

/// Create the UI for this run. `no_color` forces the plain theme.
pub fn create_ui(no_color: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    let theme = if no_color {
        ProbeTheme::plain()
    } else {
        ProbeTheme::detect()
    };
    Box::new(TerminalUI::new(mode, theme))
}
