//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Banners, every result, and the closing summary.
    #[default]
    Normal,
    /// Only findings that need attention.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the `--quiet` flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows banners and success notes.
    pub fn shows_banners(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Check if passing results are listed.
    pub fn shows_passing(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
