//! The check-evaluation engine.
//!
//! A [`CheckCatalog`] holds the ordered rules, each implementing
//! [`CheckRule`]. A [`CheckRunner`] evaluates them against an
//! [`Environment`](crate::environment::Environment) and returns one
//! [`Status`] per rule, in order. Nothing here can fail: unreadable
//! settings are classified, never raised.
//!
//! # Example
//!
//! ```
//! use cmsprobe::check::{CheckCatalog, CheckRunner, Severity};
//! use cmsprobe::config::Profile;
//! use cmsprobe::environment::Snapshot;
//!
//! let host = Snapshot::default().with_setting("memory_limit", "16M");
//! let catalog = CheckCatalog::with_builtins(&Profile::default());
//! let statuses = CheckRunner::new(&catalog).run(&host);
//!
//! assert_eq!(statuses.len(), catalog.len());
//! assert!(statuses
//!     .iter()
//!     .any(|s| s.severity() == Severity::Error && s.title() == "Memory limit below 32MB"));
//! ```

pub mod catalog;
pub mod measure;
pub mod rule;
pub mod rules;
pub mod runner;
pub mod status;
pub mod version;

pub use catalog::CheckCatalog;
pub use rule::{CheckRule, RuleId};
pub use runner::{CheckRunner, Evaluation};
pub use status::{Severity, Status};
pub use version::RuntimeVersion;
