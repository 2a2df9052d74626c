//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and supplies the shared profile
//! location and color choice.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod schema;
pub mod snapshot;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
