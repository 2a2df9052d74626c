//! The host environment as seen by the check rules.
//!
//! Rules never touch the machine directly. Everything they need is asked
//! through the [`Environment`] trait, which has two implementations:
//!
//! - [`PhpEnvironment`] - the live host, queried through the `php` binary
//! - [`Snapshot`] - a captured or hand-written description of a host, used
//!   for offline evaluation and as the test fixture
//!
//! All queries are synchronous and infallible. Unknown or unreadable values
//! come back as their empty form (`""`, `false`, `None`).

pub mod host;
pub mod php;
pub mod snapshot;

pub use host::{is_executable, resolve_host, resolve_tool_path};
pub use php::PhpEnvironment;
pub use snapshot::Snapshot;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

/// Read-only view of a host's runtime configuration and capabilities.
pub trait Environment {
    /// A named ini setting as text, `""` when unset.
    fn config_value(&self, key: &str) -> String;

    /// Whether an extension is loaded. Names compare case-insensitively.
    fn has_extension(&self, name: &str) -> bool;

    /// Whether a runtime function is available.
    fn has_function(&self, name: &str) -> bool;

    /// Whether the graphics library advertises support for a format.
    fn image_support(&self, format: ImageFormat) -> bool;

    /// Operating system family of the host.
    fn os_family(&self) -> OsFamily;

    /// Whether the run is attended (command line) rather than request-serving.
    fn is_interactive(&self) -> bool;

    /// Runtime version text, e.g. `"5.3.10-1ubuntu3"`.
    fn runtime_version(&self) -> String;

    /// Web server signature, `""` outside a web server.
    fn server_software(&self) -> String;

    /// Owner of the running script.
    fn current_user(&self) -> String;

    /// Acquire, verify and release a capability. `true` when it works.
    fn probe(&self, capability: Capability) -> bool;

    /// Resolve a host name to an address.
    fn resolve_host(&self, host: &str) -> Option<IpAddr>;

    /// Whether a file exists and may be executed.
    fn is_executable(&self, path: &Path) -> bool;
}

/// Operating system family, as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Darwin,
    Linux,
    Bsd,
    Other,
}

impl OsFamily {
    /// Classify an OS name such as `WINNT`, `Darwin` or `Linux`.
    pub fn from_os_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        if lower.starts_with("win") {
            OsFamily::Windows
        } else if lower.starts_with("darwin") {
            OsFamily::Darwin
        } else if lower.starts_with("linux") {
            OsFamily::Linux
        } else if lower.contains("bsd") {
            OsFamily::Bsd
        } else {
            OsFamily::Other
        }
    }

    /// Windows-like hosts use `;` path lists and SMTP for mail.
    pub fn is_windows(self) -> bool {
        self == OsFamily::Windows
    }

    /// Separator of `include_path` entries on this family.
    pub fn path_separator(self) -> char {
        if self.is_windows() {
            ';'
        } else {
            ':'
        }
    }
}

/// Capabilities that can only be confirmed by trying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Allocate a true-color image.
    TrueColorImage,
    /// Decode a GIF image.
    GifDecode,
    /// Decode a PNG image.
    PngDecode,
    /// Read documentation comments back through reflection.
    DocCommentReflection,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::TrueColorImage,
        Capability::GifDecode,
        Capability::PngDecode,
        Capability::DocCommentReflection,
    ];
}

/// Image formats the graphics library may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
}
