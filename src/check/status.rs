//! Check outcome types.
//!
//! Each check rule produces exactly one [`Status`]: a [`Severity`] tag, a
//! title, and an optional detail message. A status is built once by the
//! rule and never changed afterwards.

use serde::Serialize;

/// Severity of a single check outcome.
///
/// Ordered by how much attention the outcome deserves. The engine never
/// folds severities together; presenters may.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Requirement met.
    Ok,
    /// Unusual setting worth knowing about.
    Notice,
    /// Advice that does not apply to the current setup.
    Info,
    /// Works, but below the recommended level.
    Warning,
    /// Requirement not met.
    Error,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Ok,
        Severity::Notice,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Upper-case label used by line-oriented reports.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// Lower-case identifier, used for CSS classes and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of one check rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    severity: Severity,
    title: String,
    message: String,
}

impl Status {
    /// Create a status with an empty message.
    ///
    /// # Panics
    ///
    /// Panics if `title` is empty. Every status carries a headline.
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.is_empty(), "status title must not be empty");
        Self {
            severity,
            title,
            message: String::new(),
        }
    }

    pub fn ok(title: impl Into<String>) -> Self {
        Self::new(Severity::Ok, title)
    }

    pub fn notice(title: impl Into<String>) -> Self {
        Self::new(Severity::Notice, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Severity::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Severity::Error, title)
    }

    /// Attach the detail message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether there is a detail message to show.
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}
