//! Profile file discovery and loading.
//!
//! Profiles are layered, later overriding earlier:
//! 1. Built-in defaults ([`Profile::default`])
//! 2. User global profile (`<config dir>/cmsprobe/profile.yml`)
//! 3. Project profile (`./cmsprobe.yml`)
//! 4. Explicit profile (`--profile <file>`)

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::merger::merge_layers;
use super::profile::Profile;
use crate::error::{ProbeError, Result};

/// File name of the project profile.
pub const PROJECT_PROFILE: &str = "cmsprobe.yml";

/// Locations of profile files, in merge order.
#[derive(Debug, Clone, Default)]
pub struct ProfilePaths {
    /// `<config dir>/cmsprobe/profile.yml`, if present.
    pub user_global: Option<PathBuf>,

    /// `cmsprobe.yml` in the working directory, if present.
    pub project: Option<PathBuf>,

    /// Profile given on the command line. Must exist.
    pub explicit: Option<PathBuf>,
}

impl ProfilePaths {
    /// Discover profile files for a working directory.
    pub fn discover(work_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: Some(work_dir.join(PROJECT_PROFILE)).filter(|p| p.is_file()),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("cmsprobe").join("profile.yml");
        path.is_file().then_some(path)
    }

    /// All configured paths in merge order.
    pub fn layers(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.explicit]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Read one profile file as a raw YAML value.
pub fn load_profile_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ProfileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| ProbeError::ProfileParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load, merge and validate the profile from every layer.
pub fn load_profile(paths: &ProfilePaths) -> Result<Profile> {
    let mut layers =
        vec![serde_yaml::to_value(Profile::default()).map_err(anyhow::Error::from)?];
    for path in paths.layers() {
        tracing::debug!("Loading profile layer {}", path.display());
        layers.push(load_profile_value(path)?);
    }

    let merged = merge_layers(layers);
    let profile: Profile =
        serde_yaml::from_value(merged).map_err(|e| ProbeError::ProfileParseError {
            path: paths
                .layers()
                .last()
                .map(|p| p.to_path_buf())
                .unwrap_or_default(),
            message: e.to_string(),
        })?;
    profile.validate()?;
    Ok(profile)
}
