//! Dotted runtime version comparison.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static VERSION_CORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*v?(\d+(?:\.\d+)*)").expect("static regex"));

/// A runtime version reduced to its numeric segments.
///
/// Only the leading dotted number is kept, so distribution suffixes such as
/// `5.3.10-1ubuntu3.26` compare as `5.3.10`. Missing trailing segments count
/// as zero (`5.4` == `5.4.0`). Text without a leading number parses as the
/// empty version, which sorts below every real release.
#[derive(Debug, Clone, Eq)]
pub struct RuntimeVersion {
    segments: Vec<u64>,
}

impl RuntimeVersion {
    /// Parse the numeric core of a version string.
    pub fn parse(text: &str) -> Self {
        let segments = VERSION_CORE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|core| {
                core.as_str()
                    .split('.')
                    .map(|s| s.parse().unwrap_or(u64::MAX))
                    .collect()
            })
            .unwrap_or_default();
        Self { segments }
    }

    /// Whether any numeric segment was found.
    pub fn is_known(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Whether this version is strictly older than `other`.
    pub fn is_below(&self, other: &RuntimeVersion) -> bool {
        self < other
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl std::fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}
