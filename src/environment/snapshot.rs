//! A serializable description of a host environment.
//!
//! Snapshots are written by `cmsprobe snapshot` from a live host and read
//! back by `cmsprobe check --snapshot`, so a machine without a usable shell
//! can be vetted elsewhere. They are also the synthetic fixtures the tests
//! run the catalog against.
//!
//! # Example
//!
//! ```
//! use cmsprobe::environment::{Environment, Snapshot};
//!
//! let snapshot: Snapshot = serde_yaml::from_str(r#"
//! os: Linux
//! runtime_version: 5.3.29
//! settings:
//!   memory_limit: 128M
//! extensions: [json, gd]
//! "#).unwrap();
//!
//! assert_eq!(snapshot.config_value("memory_limit"), "128M");
//! assert!(snapshot.has_extension("GD"));
//! assert_eq!(snapshot.config_value("open_basedir"), "");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Capability, Environment, ImageFormat, OsFamily};
use crate::error::{ProbeError, Result};

/// Captured state of a host, evaluated without touching the host.
///
/// Every field is optional in the serialized form. Capabilities are
/// assumed to work unless listed in `broken_capabilities`; names and
/// executables are unknown unless listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    /// When the snapshot was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub captured_at: Option<DateTime<Utc>>,
    /// OS name as reported by the runtime (`Linux`, `WINNT`, `Darwin`).
    pub os: String,
    /// Attended command-line run rather than a request-serving one.
    pub interactive: bool,
    /// Runtime version text.
    #[serde(deserialize_with = "scalar_text")]
    pub runtime_version: String,
    /// Web server signature.
    pub server_software: String,
    /// Owner of the running script.
    pub current_user: String,
    /// Ini settings by name.
    #[serde(deserialize_with = "scalar_map")]
    pub settings: BTreeMap<String, String>,
    /// Loaded extensions.
    pub extensions: Vec<String>,
    /// Available runtime functions that the rules ask about.
    pub functions: Vec<String>,
    /// Image formats advertised by the graphics library.
    pub image_formats: Vec<ImageFormat>,
    /// Capabilities whose probe fails.
    pub broken_capabilities: Vec<Capability>,
    /// Name resolution results.
    pub hosts: BTreeMap<String, IpAddr>,
    /// Files known to be executable.
    pub executables: Vec<PathBuf>,
}

impl Snapshot {
    /// Load a snapshot from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProbeError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| ProbeError::SnapshotParseError {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse snapshot text. YAML is a superset of JSON, so both are accepted.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ProbeError::Other(e.into()))
    }

    /// Set one ini value.
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    /// Mark an extension as loaded.
    pub fn with_extension(mut self, name: &str) -> Self {
        self.extensions.push(name.to_string());
        self
    }

    /// Mark a function as available.
    pub fn with_function(mut self, name: &str) -> Self {
        self.functions.push(name.to_string());
        self
    }
}

/// Any YAML scalar, kept as the text the runtime would report.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Null(()),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Flag(true) => "1".to_string(),
            Scalar::Flag(false) | Scalar::Null(()) => String::new(),
        }
    }
}

pub(crate) fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

fn scalar_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into_text())).collect())
}

impl Environment for Snapshot {
    fn config_value(&self, key: &str) -> String {
        self.settings.get(key).cloned().unwrap_or_default()
    }

    fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(name))
    }

    fn has_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    fn image_support(&self, format: ImageFormat) -> bool {
        self.image_formats.contains(&format)
    }

    fn os_family(&self) -> OsFamily {
        OsFamily::from_os_name(&self.os)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn runtime_version(&self) -> String {
        self.runtime_version.clone()
    }

    fn server_software(&self) -> String {
        self.server_software.clone()
    }

    fn current_user(&self) -> String {
        self.current_user.clone()
    }

    fn probe(&self, capability: Capability) -> bool {
        !self.broken_capabilities.contains(&capability)
    }

    fn resolve_host(&self, host: &str) -> Option<IpAddr> {
        host.trim()
            .parse()
            .ok()
            .or_else(|| self.hosts.get(host.trim()).copied())
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.executables.iter().any(|p| p == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOST: &str = r#"
os: WINNT
interactive: false
runtime_version: 5.3.4
server_software: Apache/2.2.22 (Win32)
settings:
  SMTP: mail.example.com
  smtp_port: "25"
extensions: [Core, json]
functions: [imagecreatetruecolor]
image_formats: [gif, png]
broken_capabilities: [png_decode]
hosts:
  mail.example.com: 192.0.2.10
executables: [/usr/sbin/sendmail]
"#;

    #[test]
    fn parses_full_snapshot() {
        let snapshot = Snapshot::parse(HOST).unwrap();
        assert_eq!(snapshot.os_family(), OsFamily::Windows);
        assert_eq!(snapshot.config_value("SMTP"), "mail.example.com");
        assert!(snapshot.has_extension("core"));
        assert!(snapshot.has_function("imagecreatetruecolor"));
        assert!(snapshot.image_support(ImageFormat::Gif));
        assert!(!snapshot.image_support(ImageFormat::Jpeg));
        assert!(snapshot.probe(Capability::TrueColorImage));
        assert!(!snapshot.probe(Capability::PngDecode));
        assert!(snapshot.is_executable(Path::new("/usr/sbin/sendmail")));
    }

    #[test]
    fn resolves_literal_and_listed_hosts() {
        let snapshot = Snapshot::parse(HOST).unwrap();
        assert_eq!(
            snapshot.resolve_host("mail.example.com"),
            Some("192.0.2.10".parse().unwrap())
        );
        assert_eq!(
            snapshot.resolve_host("10.1.1.1"),
            Some("10.1.1.1".parse().unwrap())
        );
        assert_eq!(snapshot.resolve_host("unknown.invalid"), None);
    }

    #[test]
    fn empty_snapshot_answers_with_empty_values() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.config_value("memory_limit"), "");
        assert!(!snapshot.has_extension("json"));
        assert!(!snapshot.is_interactive());
        assert_eq!(snapshot.os_family(), OsFamily::Other);
        assert!(snapshot.probe(Capability::DocCommentReflection));
    }

    #[test]
    fn accepts_unquoted_scalars_as_text() {
        let snapshot = Snapshot::parse(
            "runtime_version: 5.4\nsettings:\n  max_execution_time: 0\n  file_uploads: true\n  doc_root: ~\n",
        )
        .unwrap();
        assert_eq!(snapshot.runtime_version(), "5.4");
        assert_eq!(snapshot.config_value("max_execution_time"), "0");
        assert_eq!(snapshot.config_value("file_uploads"), "1");
        assert_eq!(snapshot.config_value("doc_root"), "");
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Snapshot::parse("memory_limit: 16M").is_err());
    }

    #[test]
    fn yaml_round_trip_preserves_snapshot() {
        let snapshot = Snapshot::parse(HOST).unwrap();
        let yaml = snapshot.to_yaml().unwrap();
        assert_eq!(Snapshot::parse(&yaml).unwrap(), snapshot);
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Snapshot::load(&temp.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ProbeError::SnapshotNotFound { .. }));
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("host.yml");
        std::fs::write(&path, "settings: [not, a, map]").unwrap();
        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, ProbeError::SnapshotParseError { .. }));
    }

    #[test]
    fn builder_helpers_fill_fields() {
        let snapshot = Snapshot::default()
            .with_setting("memory_limit", "64M")
            .with_extension("suhosin")
            .with_function("imagettftext");
        assert_eq!(snapshot.config_value("memory_limit"), "64M");
        assert!(snapshot.has_extension("suhosin"));
        assert!(snapshot.has_function("imagettftext"));
    }
}
