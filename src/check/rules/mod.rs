//! Built-in check rules.
//!
//! Each rule lives in its own file, grouped by the area of the runtime it
//! inspects. [`builtin`] lists them in report order.

mod execution_time;
mod extensions;
mod graphics;
mod hardening;
mod include_path;
mod legacy;
mod mail;
mod memory;
mod opcode_cache;
mod reflection;
mod restrictions;
mod runtime_version;
mod thread_stack;
mod uploads;

pub use execution_time::MaxExecutionTimeRule;
pub use extensions::RequiredExtensionRule;
pub use graphics::{FreeTypeRule, GifSupportRule, JpegSupportRule, PngSupportRule, TrueColorRule};
pub use hardening::{HardeningLimitRule, HardeningLoadedRule, IncludeWhitelistRule};
pub use include_path::IncludePathRule;
pub use legacy::{MagicQuotesRule, RegisterGlobalsRule};
pub use mail::MailTransportRule;
pub use memory::MemoryLimitRule;
pub use opcode_cache::OpcodeCacheRule;
pub use reflection::DocCommentReflectionRule;
pub use restrictions::{
    DisableFunctionsRule, DocRootRule, OpenBasedirRule, SafeModeRule, SqlSafeModeRule,
};
pub use runtime_version::RuntimeVersionRule;
pub use thread_stack::ThreadStackSizeRule;
pub use uploads::{FileUploadsRule, PostMaxSizeRule, UploadMaxFilesizeRule};

use super::rule::CheckRule;
use super::version::RuntimeVersion;
use crate::config::Profile;
use crate::environment::Environment;

/// Extension providing the hardening settings.
pub(crate) const HARDENING_EXTENSION: &str = "suhosin";

/// Every built-in rule, in report order.
pub fn builtin(profile: &Profile) -> Vec<Box<dyn CheckRule>> {
    let mut rules: Vec<Box<dyn CheckRule>> = vec![
        Box::new(IncludePathRule),
        Box::new(FileUploadsRule),
        Box::new(UploadMaxFilesizeRule::new(profile.upload_minimum_bytes())),
        Box::new(PostMaxSizeRule),
        Box::new(MemoryLimitRule::new(
            profile.memory_minimum_bytes(),
            profile.memory_recommended_bytes(),
        )),
        Box::new(RuntimeVersionRule::new(
            &profile.runtime.minimum_version,
            &profile.runtime.recommended_version,
        )),
        Box::new(MaxExecutionTimeRule::new(
            profile.execution_time.minimum,
            profile.execution_time.recommended,
        )),
        Box::new(DisableFunctionsRule),
        Box::new(SafeModeRule),
        Box::new(DocRootRule),
        Box::new(SqlSafeModeRule),
        Box::new(OpenBasedirRule),
        Box::new(HardeningLoadedRule),
        Box::new(HardeningLimitRule::request_max_vars(
            profile.hardening.request_max_vars,
        )),
        Box::new(HardeningLimitRule::post_max_vars(profile.hardening.post_max_vars)),
        Box::new(HardeningLimitRule::get_max_value_length(
            profile.hardening.get_max_value_length,
        )),
        Box::new(IncludeWhitelistRule::phar()),
        Box::new(IncludeWhitelistRule::vfs()),
        Box::new(OpcodeCacheRule::new(profile.opcode_caches.clone())),
        Box::new(DocCommentReflectionRule),
        Box::new(ThreadStackSizeRule),
    ];

    rules.extend(
        profile
            .required_extensions
            .iter()
            .map(|name| Box::new(RequiredExtensionRule::new(name)) as Box<dyn CheckRule>),
    );

    let tail: [Box<dyn CheckRule>; 8] = [
        Box::new(MailTransportRule),
        Box::new(TrueColorRule),
        Box::new(GifSupportRule),
        Box::new(JpegSupportRule),
        Box::new(PngSupportRule),
        Box::new(FreeTypeRule),
        Box::new(MagicQuotesRule),
        Box::new(RegisterGlobalsRule),
    ];
    rules.extend(tail);

    rules
}

/// Settings that were removed from the runtime in 5.4 are only read on
/// older versions.
pub(crate) fn predates_5_4(env: &dyn Environment) -> bool {
    RuntimeVersion::parse(&env.runtime_version()) < RuntimeVersion::parse("5.4")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Snapshot;

    #[test]
    fn ids_are_unique_and_kebab_case() {
        let rules = builtin(&Profile::default());
        let mut ids: Vec<String> = rules.iter().map(|r| r.id().to_string()).collect();
        for id in &ids {
            let base = id.split(':').next().unwrap();
            assert!(
                base.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{} is not kebab-case",
                id
            );
        }
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn every_rule_has_name_and_description() {
        for rule in builtin(&Profile::default()) {
            assert!(!rule.name().is_empty(), "{} has no name", rule.id());
            assert!(!rule.description().is_empty(), "{} has no description", rule.id());
        }
    }

    #[test]
    fn every_rule_answers_an_empty_host() {
        let host = Snapshot::default();
        for rule in builtin(&Profile::default()) {
            let status = rule.evaluate(&host);
            assert!(!status.title().is_empty(), "{} gave an empty title", rule.id());
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let host = Snapshot::default()
            .with_setting("memory_limit", "48M")
            .with_setting("max_execution_time", "60")
            .with_extension("suhosin");
        for rule in builtin(&Profile::default()) {
            assert_eq!(rule.evaluate(&host), rule.evaluate(&host));
        }
    }

    #[test]
    fn version_gate() {
        let old = Snapshot {
            runtime_version: "5.3.29".to_string(),
            ..Default::default()
        };
        let new = Snapshot {
            runtime_version: "5.4.0".to_string(),
            ..Default::default()
        };
        assert!(predates_5_4(&old));
        assert!(!predates_5_4(&new));
    }
}
