//! Requirement profile loading, layering and validation.
//!
//! - The profile type and its defaults in [`profile`]
//! - File discovery and loading in [`loader`]
//! - Deep merging of layers in [`merger`]
//!
//! # Example
//!
//! ```
//! use cmsprobe::config::{load_profile, ProfilePaths};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("cmsprobe.yml"), "memory:\n  recommended: 128M\n").unwrap();
//!
//! let paths = ProfilePaths {
//!     project: Some(temp.path().join("cmsprobe.yml")),
//!     ..Default::default()
//! };
//! let profile = load_profile(&paths).unwrap();
//! assert_eq!(profile.memory.minimum, "32M");
//! assert_eq!(profile.memory.recommended, "128M");
//! ```

pub mod loader;
pub mod merger;
pub mod profile;

pub use loader::{load_profile, load_profile_value, ProfilePaths, PROJECT_PROFILE};
pub use merger::{deep_merge, merge_layers};
pub use profile::{
    ExecutionTimeRequirement, HardeningRequirement, MemoryRequirement, Profile,
    RuntimeRequirement, UploadRequirement,
};
