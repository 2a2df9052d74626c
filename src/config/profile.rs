//! The requirement profile of the application being vetted.
//!
//! A profile names the thresholds the check rules compare against. The
//! defaults describe TYPO3 CMS; a YAML file may override any part of them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::check::measure::parse_size_bytes;
use crate::check::version::RuntimeVersion;
use crate::environment::snapshot::scalar_text;
use crate::error::{ProbeError, Result};

/// Thresholds and required components of a target application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Display name of the application.
    pub application: String,

    /// Runtime version bounds.
    pub runtime: RuntimeRequirement,

    /// `memory_limit` bounds.
    pub memory: MemoryRequirement,

    /// `max_execution_time` bounds, in seconds.
    pub execution_time: ExecutionTimeRequirement,

    /// File upload bounds.
    pub uploads: UploadRequirement,

    /// Minimums for the hardening extension's limits.
    pub hardening: HardeningRequirement,

    /// Extensions that must be loaded, checked in this order.
    pub required_extensions: Vec<String>,

    /// Opcode cache extensions; any one of them satisfies the check.
    pub opcode_caches: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            application: "TYPO3 CMS".to_string(),
            runtime: RuntimeRequirement::default(),
            memory: MemoryRequirement::default(),
            execution_time: ExecutionTimeRequirement::default(),
            uploads: UploadRequirement::default(),
            hardening: HardeningRequirement::default(),
            required_extensions: [
                "fileinfo", "filter", "gd", "hash", "json", "mysql", "openssl", "pcre", "session",
                "soap", "SPL", "standard", "xml", "zip", "zlib",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            opcode_caches: ["eaccelerator", "xcache", "apc", "Zend OPcache"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeRequirement {
    /// Oldest runtime that can run the application at all.
    #[serde(deserialize_with = "scalar_text")]
    pub minimum_version: String,
    /// Oldest runtime without known problems.
    #[serde(deserialize_with = "scalar_text")]
    pub recommended_version: String,
}

impl Default for RuntimeRequirement {
    fn default() -> Self {
        Self {
            minimum_version: "5.3.0".to_string(),
            recommended_version: "5.3.7".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryRequirement {
    /// Size with optional `K`/`M`/`G` suffix.
    #[serde(deserialize_with = "scalar_text")]
    pub minimum: String,
    #[serde(deserialize_with = "scalar_text")]
    pub recommended: String,
}

impl Default for MemoryRequirement {
    fn default() -> Self {
        Self {
            minimum: "32M".to_string(),
            recommended: "64M".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionTimeRequirement {
    pub minimum: i64,
    pub recommended: i64,
}

impl Default for ExecutionTimeRequirement {
    fn default() -> Self {
        Self {
            minimum: 30,
            recommended: 240,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct UploadRequirement {
    /// Smallest acceptable `upload_max_filesize`.
    #[serde(deserialize_with = "scalar_text")]
    pub minimum_file_size: String,
}

impl Default for UploadRequirement {
    fn default() -> Self {
        Self {
            minimum_file_size: "10M".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct HardeningRequirement {
    pub request_max_vars: i64,
    pub post_max_vars: i64,
    pub get_max_value_length: i64,
}

impl Default for HardeningRequirement {
    fn default() -> Self {
        Self {
            request_max_vars: 400,
            post_max_vars: 400,
            get_max_value_length: 2000,
        }
    }
}

impl Profile {
    /// Check that the thresholds make sense together.
    ///
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(ProbeError::ProfileInvalid { message });

        if self.application.trim().is_empty() {
            return invalid("application must not be empty".to_string());
        }

        let minimum = RuntimeVersion::parse(&self.runtime.minimum_version);
        let recommended = RuntimeVersion::parse(&self.runtime.recommended_version);
        if !minimum.is_known() {
            return invalid(format!(
                "runtime.minimum_version '{}' is not a version",
                self.runtime.minimum_version
            ));
        }
        if !recommended.is_known() {
            return invalid(format!(
                "runtime.recommended_version '{}' is not a version",
                self.runtime.recommended_version
            ));
        }
        if recommended < minimum {
            return invalid("runtime.minimum_version exceeds runtime.recommended_version".to_string());
        }

        for (field, value) in [
            ("memory.minimum", &self.memory.minimum),
            ("memory.recommended", &self.memory.recommended),
            ("uploads.minimum_file_size", &self.uploads.minimum_file_size),
        ] {
            if parse_size_bytes(value) <= 0 {
                return invalid(format!("{} must be a positive size, got '{}'", field, value));
            }
        }
        if self.memory_minimum_bytes() > self.memory_recommended_bytes() {
            return invalid("memory.minimum exceeds memory.recommended".to_string());
        }

        if self.execution_time.minimum < 0 {
            return invalid("execution_time.minimum must not be negative".to_string());
        }
        if self.execution_time.minimum > self.execution_time.recommended {
            return invalid("execution_time.minimum exceeds execution_time.recommended".to_string());
        }

        for (field, value) in [
            ("hardening.request_max_vars", self.hardening.request_max_vars),
            ("hardening.post_max_vars", self.hardening.post_max_vars),
            ("hardening.get_max_value_length", self.hardening.get_max_value_length),
        ] {
            if value < 0 {
                return invalid(format!("{} must not be negative", field));
            }
        }

        if self.required_extensions.iter().any(|e| e.trim().is_empty()) {
            return invalid("required_extensions contains an empty name".to_string());
        }
        if self.opcode_caches.iter().any(|e| e.trim().is_empty()) {
            return invalid("opcode_caches contains an empty name".to_string());
        }

        Ok(())
    }

    pub fn memory_minimum_bytes(&self) -> i64 {
        parse_size_bytes(&self.memory.minimum)
    }

    pub fn memory_recommended_bytes(&self) -> i64 {
        parse_size_bytes(&self.memory.recommended)
    }

    pub fn upload_minimum_bytes(&self) -> i64 {
        parse_size_bytes(&self.uploads.minimum_file_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_typo3() {
        let profile = Profile::default();
        assert_eq!(profile.application, "TYPO3 CMS");
        assert_eq!(profile.memory_minimum_bytes(), 32 * 1024 * 1024);
        assert_eq!(profile.memory_recommended_bytes(), 64 * 1024 * 1024);
        assert_eq!(profile.upload_minimum_bytes(), 10 * 1024 * 1024);
        assert_eq!(profile.required_extensions.len(), 15);
        assert_eq!(profile.required_extensions[0], "fileinfo");
        assert_eq!(profile.required_extensions[14], "zlib");
        assert!(profile.opcode_caches.contains(&"Zend OPcache".to_string()));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Profile::default().validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let profile: Profile = serde_yaml::from_str("memory:\n  recommended: 128M\n").unwrap();
        assert_eq!(profile.memory.minimum, "32M");
        assert_eq!(profile.memory.recommended, "128M");
        assert_eq!(profile.execution_time.recommended, 240);
    }

    #[test]
    fn unquoted_numbers_are_accepted_as_text() {
        let profile: Profile =
            serde_yaml::from_str("runtime:\n  minimum_version: 5.4\nmemory:\n  minimum: 33554432\n")
                .unwrap();
        assert_eq!(profile.runtime.minimum_version, "5.4");
        assert_eq!(profile.memory_minimum_bytes(), 32 * 1024 * 1024);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<Profile>("memroy:\n  minimum: 1M\n").is_err());
    }

    #[test]
    fn validate_rejects_inverted_memory() {
        let mut profile = Profile::default();
        profile.memory.minimum = "128M".to_string();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("memory.minimum exceeds memory.recommended"));
    }

    #[test]
    fn validate_rejects_zero_size() {
        let mut profile = Profile::default();
        profile.uploads.minimum_file_size = "none".to_string();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("uploads.minimum_file_size"));
    }

    #[test]
    fn validate_rejects_bad_version() {
        let mut profile = Profile::default();
        profile.runtime.minimum_version = "latest".to_string();
        assert!(profile.validate().is_err());

        let mut profile = Profile::default();
        profile.runtime.minimum_version = "7.0".to_string();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds runtime.recommended_version"));
    }

    #[test]
    fn validate_rejects_inverted_execution_time() {
        let mut profile = Profile::default();
        profile.execution_time.minimum = 300;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_extension_name() {
        let mut profile = Profile::default();
        profile.required_extensions.push("  ".to_string());
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("required_extensions"));
    }
}
