//! cmsprobe - Checks a PHP host for the ability to run a CMS.
//!
//! cmsprobe evaluates an ordered catalog of requirement checks against a
//! host's PHP configuration and capabilities, and reports one graded
//! status per check. The host is either queried live through the `php`
//! binary or described by a snapshot file.
//!
//! # Modules
//!
//! - [`check`] - Status model, check rules, catalog and runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Requirement profile loading, layering and validation
//! - [`environment`] - Live and snapshot views of the host
//! - [`error`] - Error types and result aliases
//! - [`report`] - Text, HTML and JSON presenters
//! - [`ui`] - Terminal output and theme
//!
//! # Example
//!
//! ```
//! use cmsprobe::check::{CheckCatalog, CheckRunner, Severity};
//! use cmsprobe::config::Profile;
//! use cmsprobe::environment::Snapshot;
//!
//! let host = Snapshot::default()
//!     .with_setting("memory_limit", "128M")
//!     .with_extension("json");
//!
//! let catalog = CheckCatalog::with_builtins(&Profile::default());
//! let statuses = CheckRunner::new(&catalog).run(&host);
//!
//! assert_eq!(statuses.len(), catalog.len());
//! assert!(statuses.iter().any(|s| s.severity() == Severity::Error));
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod report;
pub mod ui;

pub use error::{ProbeError, Result};
