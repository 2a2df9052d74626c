//! The live host, queried through the `php` command-line binary.
//!
//! Static facts (settings, extensions, functions, version) are collected
//! once by a single script that prints a JSON document. Capability probes
//! run a short snippet each, in a child process that is always reaped.

use std::collections::BTreeMap;
use std::io::Read;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use chrono::Utc;
use serde::Deserialize;

use super::host::{self, parse_system_path, resolve_tool_path};
use super::{Capability, Environment, ImageFormat, OsFamily, Snapshot};
use crate::error::{ProbeError, Result};

/// Functions the rules ask about. Only these are reported by the
/// collection script.
const PROBED_FUNCTIONS: &[&str] = &[
    "imagecreatetruecolor",
    "imagecreatefromgif",
    "imagegif",
    "imagecreatefromjpeg",
    "imagejpeg",
    "imagecreatefrompng",
    "imagepng",
    "imagettftext",
];

const COLLECT_SCRIPT: &str = r#"
$settings = array();
foreach ((array) ini_get_all(null, false) as $key => $value) {
    $settings[$key] = $value === null ? null : (string) $value;
}
$functions = array();
foreach (json_decode($argv[1]) as $name) {
    if (function_exists($name)) {
        $functions[] = $name;
    }
}
echo json_encode(array(
    'os' => PHP_OS,
    'sapi' => PHP_SAPI,
    'version' => PHP_VERSION,
    'server_software' => isset($_SERVER['SERVER_SOFTWARE']) ? (string) $_SERVER['SERVER_SOFTWARE'] : '',
    'user' => get_current_user(),
    'settings' => (object) $settings,
    'extensions' => get_loaded_extensions(),
    'functions' => $functions,
    'image_types' => function_exists('imagetypes') ? imagetypes() : 0,
));
"#;

// 1x1 images, written to a temporary file so the format-specific decoder runs.
const GIF_PIXEL: &str = "R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==";
const PNG_PIXEL: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

// Bits of imagetypes().
const IMG_GIF: u32 = 1;
const IMG_JPG: u32 = 2;
const IMG_PNG: u32 = 4;

/// Output of the collection script.
#[derive(Debug, Deserialize)]
struct Collected {
    os: String,
    sapi: String,
    version: String,
    #[serde(default)]
    server_software: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    settings: BTreeMap<String, Option<String>>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    functions: Vec<String>,
    #[serde(default)]
    image_types: u32,
}

impl Collected {
    fn into_snapshot(self, unattended: bool) -> Snapshot {
        let image_formats = [
            (IMG_GIF, ImageFormat::Gif),
            (IMG_JPG, ImageFormat::Jpeg),
            (IMG_PNG, ImageFormat::Png),
        ]
        .into_iter()
        .filter(|(bit, _)| self.image_types & bit != 0)
        .map(|(_, format)| format)
        .collect();

        Snapshot {
            captured_at: None,
            os: self.os,
            interactive: self.sapi == "cli" && !unattended,
            runtime_version: self.version,
            server_software: self.server_software,
            current_user: self.user,
            settings: self
                .settings
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or_default()))
                .collect(),
            extensions: self.extensions,
            functions: self.functions,
            image_formats,
            broken_capabilities: Vec::new(),
            hosts: BTreeMap::new(),
            executables: Vec::new(),
        }
    }
}

/// Kills and reaps a child process when dropped.
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// The host the `php` binary runs on.
#[derive(Debug, Clone)]
pub struct PhpEnvironment {
    binary: PathBuf,
    facts: Snapshot,
}

impl PhpEnvironment {
    /// Locate the interpreter and collect the host's static facts.
    ///
    /// `binary` is a name looked up on `PATH` or an explicit path; `None`
    /// means `php`. With `unattended`, the run is treated as
    /// request-serving even from the command line.
    pub fn discover(binary: Option<&str>, unattended: bool) -> Result<Self> {
        let tool = binary.unwrap_or("php");
        let binary = resolve_tool_path(tool, &parse_system_path()).ok_or_else(|| {
            ProbeError::RuntimeNotFound {
                binary: tool.to_string(),
            }
        })?;
        tracing::debug!("Using runtime at {}", binary.display());

        let output = Command::new(&binary)
            .arg("-r")
            .arg(COLLECT_SCRIPT)
            .arg(serde_json::to_string(PROBED_FUNCTIONS).map_err(anyhow::Error::from)?)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ProbeError::RuntimeCollectionFailed {
                message: format!("failed to run {}: {}", binary.display(), e),
            })?;
        if !output.status.success() {
            return Err(ProbeError::RuntimeCollectionFailed {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let facts = parse_collected(&String::from_utf8_lossy(&output.stdout), unattended)?;
        tracing::info!(
            "Collected {} settings and {} extensions from PHP {}",
            facts.settings.len(),
            facts.extensions.len(),
            facts.runtime_version
        );
        Ok(Self { binary, facts })
    }

    /// Path of the interpreter in use.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Freeze the host into a snapshot, running every probe once.
    pub fn capture(&self) -> Snapshot {
        let mut snapshot = self.facts.clone();
        snapshot.captured_at = Some(Utc::now());
        snapshot.broken_capabilities = Capability::ALL
            .into_iter()
            .filter(|capability| !self.probe(*capability))
            .collect();

        let smtp = self.config_value("SMTP");
        let smtp = smtp.trim();
        if !smtp.is_empty() && smtp.parse::<IpAddr>().is_err() {
            if let Some(ip) = host::resolve_host(smtp) {
                snapshot.hosts.insert(smtp.to_string(), ip);
            }
        }

        let sendmail = self.config_value("sendmail_path");
        if let Some(program) = sendmail.split_whitespace().next() {
            let program = PathBuf::from(program);
            if host::is_executable(&program) {
                snapshot.executables.push(program);
            }
        }
        snapshot
    }

    fn run_probe(&self, capability: Capability) -> bool {
        let child = Command::new(&self.binary)
            .arg("-r")
            .arg(probe_snippet(capability))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();
        let mut guard = match child {
            Ok(child) => ChildGuard(child),
            Err(e) => {
                tracing::warn!("Could not start probe for {:?}: {}", capability, e);
                return false;
            }
        };

        let mut out = String::new();
        if let Some(mut stdout) = guard.0.stdout.take() {
            let _ = stdout.read_to_string(&mut out);
        }
        let passed = matches!(guard.0.wait(), Ok(status) if status.success()) && out.trim() == "ok";
        tracing::debug!("Probe {:?}: {}", capability, if passed { "ok" } else { "failed" });
        passed
    }
}

fn parse_collected(stdout: &str, unattended: bool) -> Result<Snapshot> {
    let collected: Collected =
        serde_json::from_str(stdout.trim()).map_err(|e| ProbeError::RuntimeCollectionFailed {
            message: format!("unexpected collection output: {}", e),
        })?;
    Ok(collected.into_snapshot(unattended))
}

fn probe_snippet(capability: Capability) -> String {
    match capability {
        Capability::TrueColorImage => {
            "$i = @imagecreatetruecolor(50, 100); if ($i) { imagedestroy($i); echo 'ok'; }"
                .to_string()
        }
        Capability::GifDecode => decode_snippet("imagecreatefromgif", GIF_PIXEL),
        Capability::PngDecode => decode_snippet("imagecreatefrompng", PNG_PIXEL),
        Capability::DocCommentReflection => "/** cmsprobe */ function cmsprobe_doc() {} \
             $r = new ReflectionFunction('cmsprobe_doc'); \
             if (strlen((string) $r->getDocComment()) > 0) { echo 'ok'; }"
            .to_string(),
    }
}

fn decode_snippet(decoder: &str, pixel: &str) -> String {
    format!(
        "$f = tempnam(sys_get_temp_dir(), 'cmsprobe'); \
         file_put_contents($f, base64_decode('{}')); \
         $i = @{}($f); unlink($f); \
         if ($i) {{ imagedestroy($i); echo 'ok'; }}",
        pixel, decoder
    )
}

impl Environment for PhpEnvironment {
    fn config_value(&self, key: &str) -> String {
        self.facts.config_value(key)
    }

    fn has_extension(&self, name: &str) -> bool {
        self.facts.has_extension(name)
    }

    fn has_function(&self, name: &str) -> bool {
        self.facts.has_function(name)
    }

    fn image_support(&self, format: ImageFormat) -> bool {
        self.facts.image_support(format)
    }

    fn os_family(&self) -> OsFamily {
        self.facts.os_family()
    }

    fn is_interactive(&self) -> bool {
        self.facts.is_interactive()
    }

    fn runtime_version(&self) -> String {
        self.facts.runtime_version()
    }

    fn server_software(&self) -> String {
        self.facts.server_software()
    }

    fn current_user(&self) -> String {
        self.facts.current_user()
    }

    fn probe(&self, capability: Capability) -> bool {
        self.run_probe(capability)
    }

    fn resolve_host(&self, name: &str) -> Option<IpAddr> {
        host::resolve_host(name)
    }

    fn is_executable(&self, path: &Path) -> bool {
        host::is_executable(path)
    }
}
