//! Rules for the suhosin hardening extension.
//!
//! The extension is optional. When it is missing, the limit and whitelist
//! rules only say what to configure if it is ever enabled; when it is
//! loaded, its defaults are too tight for large backend forms.

use super::HARDENING_EXTENSION;
use crate::check::measure::{parse_number, split_list};
use crate::check::{CheckRule, RuleId, Severity, Status};
use crate::environment::Environment;

const WHITELIST: &str = "suhosin.executor.include.whitelist";
const USEFUL_WHITELIST: &str = "suhosin.executor.include.whitelist = phar vfs";

fn not_loaded(advice: String) -> Status {
    Status::info("Suhosin not loaded").with_message(format!("If enabling suhosin, {}", advice))
}

/// Reports whether the hardening extension is loaded.
pub struct HardeningLoadedRule;

impl CheckRule for HardeningLoadedRule {
    fn id(&self) -> RuleId {
        RuleId::new("hardening-loaded")
    }

    fn name(&self) -> &str {
        "Hardening Extension"
    }

    fn description(&self) -> &str {
        "Reports whether the suhosin extension is loaded"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if env.has_extension(HARDENING_EXTENSION) {
            Status::ok("Suhosin extension loaded")
        } else {
            Status::notice("Suhosin extension not loaded").with_message(
                "suhosin hardens the runtime and is good to have from a security point of \
                 view. The application works with it, but needs some settings above their \
                 defaults once it is enabled.",
            )
        }
    }
}

/// A numeric suhosin limit that must reach a minimum.
pub struct HardeningLimitRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    setting: &'static str,
    minimum: i64,
}

impl HardeningLimitRule {
    pub fn request_max_vars(minimum: i64) -> Self {
        Self {
            id: "hardening-request-max-vars",
            name: "Hardening Request Variables",
            description: "Checks suhosin.request.max_vars when suhosin is loaded",
            setting: "suhosin.request.max_vars",
            minimum,
        }
    }

    pub fn post_max_vars(minimum: i64) -> Self {
        Self {
            id: "hardening-post-max-vars",
            name: "Hardening POST Variables",
            description: "Checks suhosin.post.max_vars when suhosin is loaded",
            setting: "suhosin.post.max_vars",
            minimum,
        }
    }

    pub fn get_max_value_length(minimum: i64) -> Self {
        Self {
            id: "hardening-get-max-value-length",
            name: "Hardening GET Value Length",
            description: "Checks suhosin.get.max_value_length when suhosin is loaded",
            setting: "suhosin.get.max_value_length",
            minimum,
        }
    }
}

impl CheckRule for HardeningLimitRule {
    fn id(&self) -> RuleId {
        RuleId::new(self.id)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if !env.has_extension(HARDENING_EXTENSION) {
            return not_loaded(format!(
                "{} should be set to at least {}",
                self.setting, self.minimum
            ));
        }

        let raw = env.config_value(self.setting);
        if parse_number(&raw) < self.minimum {
            Status::error(format!("{} not high enough", self.setting)).with_message(format!(
                "{}={}. Big forms such as the install tool lose fields with this limit. \
                 Raise it to at least {}.",
                self.setting, raw, self.minimum
            ))
        } else {
            Status::ok(format!("{} ok", self.setting))
        }
    }
}

/// The include whitelist should name a stream wrapper.
pub struct IncludeWhitelistRule {
    scheme: &'static str,
    severity: Severity,
    reason: &'static str,
}

impl IncludeWhitelistRule {
    pub fn phar() -> Self {
        Self {
            scheme: "phar",
            severity: Severity::Notice,
            reason: "phar is not a hard requirement yet, but is nice to have and likely \
                     required in future versions.",
        }
    }

    pub fn vfs() -> Self {
        Self {
            scheme: "vfs",
            severity: Severity::Warning,
            reason: "vfs is not a hard requirement, but the unit tests rely on it.",
        }
    }
}

impl CheckRule for IncludeWhitelistRule {
    fn id(&self) -> RuleId {
        RuleId::new(format!("hardening-include-whitelist-{}", self.scheme))
    }

    fn name(&self) -> &str {
        if self.scheme == "phar" {
            "Hardening Include Whitelist (phar)"
        } else {
            "Hardening Include Whitelist (vfs)"
        }
    }

    fn description(&self) -> &str {
        "Checks the suhosin include whitelist names a stream wrapper"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if !env.has_extension(HARDENING_EXTENSION) {
            return not_loaded(format!("a useful setting is \"{}\"", USEFUL_WHITELIST));
        }

        let raw = env.config_value(WHITELIST);
        let entries = split_list(&raw, |c| c == ',' || c.is_whitespace());
        if entries.contains(&self.scheme) {
            Status::ok(format!("{} contains {}", WHITELIST, self.scheme))
        } else {
            Status::new(
                self.severity,
                format!("{} does not contain {}", WHITELIST, self.scheme),
            )
            .with_message(format!(
                "{}= {}. {} A useful setting is \"{}\"",
                WHITELIST,
                entries.join(" "),
                self.reason,
                USEFUL_WHITELIST
            ))
        }
    }
}
