//! Graphics library support.
//!
//! Static inspection looks at the functions and image formats the library
//! advertises. Where a format has been seen to be advertised but broken,
//! the rule also decodes a tiny image through the environment's probe.

use crate::check::{CheckRule, RuleId, Status};
use crate::environment::{Capability, Environment, ImageFormat};

/// A graphics capability check: static requirements, then an optional
/// live probe.
struct GraphicsCheck {
    label: &'static str,
    functions: &'static [&'static str],
    format: Option<ImageFormat>,
    probe: Option<Capability>,
}

impl GraphicsCheck {
    fn evaluate(&self, env: &dyn Environment) -> Status {
        let declared = self.functions.iter().all(|f| env.has_function(f))
            && self.format.map_or(true, |format| env.image_support(format));

        if !declared {
            return Status::error(format!("GD library {} missing", self.label)).with_message(
                format!(
                    "The GD library must be built with {} ({}). The application needs it \
                     to process images.",
                    self.label,
                    self.functions.join(", ")
                ),
            );
        }

        match self.probe {
            Some(capability) if !env.probe(capability) => {
                Status::error(format!("GD library {} broken", self.label)).with_message(format!(
                    "GD reports {}, but a test call failed. This must be fixed, image \
                     processing will not work otherwise.",
                    self.label
                ))
            }
            _ => Status::ok(format!("GD library {} works", self.label)),
        }
    }
}

macro_rules! graphics_rule {
    ($rule:ident, $id:literal, $name:literal, $check:expr) => {
        pub struct $rule;

        impl CheckRule for $rule {
            fn id(&self) -> RuleId {
                RuleId::new($id)
            }

            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> &str {
                concat!("Checks GD library ", $name, " support")
            }

            fn evaluate(&self, env: &dyn Environment) -> Status {
                $check.evaluate(env)
            }
        }
    };
}

graphics_rule!(
    TrueColorRule,
    "graphics-true-color",
    "true color",
    GraphicsCheck {
        label: "true color support",
        functions: &["imagecreatetruecolor"],
        format: None,
        probe: Some(Capability::TrueColorImage),
    }
);

graphics_rule!(
    GifSupportRule,
    "graphics-gif",
    "gif",
    GraphicsCheck {
        label: "gif support",
        functions: &["imagecreatefromgif", "imagegif"],
        format: Some(ImageFormat::Gif),
        probe: Some(Capability::GifDecode),
    }
);

graphics_rule!(
    JpegSupportRule,
    "graphics-jpeg",
    "jpeg",
    GraphicsCheck {
        label: "jpeg support",
        functions: &["imagecreatefromjpeg", "imagejpeg"],
        format: Some(ImageFormat::Jpeg),
        probe: None,
    }
);

graphics_rule!(
    PngSupportRule,
    "graphics-png",
    "png",
    GraphicsCheck {
        label: "png support",
        functions: &["imagecreatefrompng", "imagepng"],
        format: Some(ImageFormat::Png),
        probe: Some(Capability::PngDecode),
    }
);

/// FreeType text rendering; no probe, but the pass carries a hint about
/// font sizes.
pub struct FreeTypeRule;

impl CheckRule for FreeTypeRule {
    fn id(&self) -> RuleId {
        RuleId::new("graphics-freetype")
    }

    fn name(&self) -> &str {
        "freetype"
    }

    fn description(&self) -> &str {
        "Checks GD library freetype font support"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if env.has_function("imagettftext") {
            Status::ok("GD library freetype support works").with_message(
                "GD versions differ in how they interpret font sizes. Once the installation \
                 is complete, a test in the install tool finds the right value.",
            )
        } else {
            Status::error("GD library freetype support missing").with_message(
                "Core features and extensions render text onto images through GD \
                 (imagettftext). This support is missing; install it.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    fn full_gd() -> Snapshot {
        let mut host = Snapshot::default();
        for f in [
            "imagecreatetruecolor",
            "imagecreatefromgif",
            "imagegif",
            "imagecreatefromjpeg",
            "imagejpeg",
            "imagecreatefrompng",
            "imagepng",
            "imagettftext",
        ] {
            host = host.with_function(f);
        }
        host.image_formats = vec![ImageFormat::Gif, ImageFormat::Jpeg, ImageFormat::Png];
        host
    }

    fn all_rules() -> Vec<Box<dyn CheckRule>> {
        vec![
            Box::new(TrueColorRule),
            Box::new(GifSupportRule),
            Box::new(JpegSupportRule),
            Box::new(PngSupportRule),
            Box::new(FreeTypeRule),
        ]
    }

    #[test]
    fn complete_library_passes() {
        let host = full_gd();
        for rule in all_rules() {
            assert_eq!(rule.evaluate(&host).severity(), Severity::Ok, "{}", rule.id());
        }
    }

    #[test]
    fn no_library_fails_everything_as_missing() {
        let host = Snapshot::default();
        for rule in all_rules() {
            let status = rule.evaluate(&host);
            assert_eq!(status.severity(), Severity::Error, "{}", rule.id());
            assert!(status.title().ends_with("missing"), "{}", status.title());
        }
    }

    #[test]
    fn missing_function_names_it() {
        let mut host = full_gd();
        host.functions.retain(|f| f != "imagegif");
        let status = GifSupportRule.evaluate(&host);
        assert_eq!(status.title(), "GD library gif support missing");
        assert!(status.message().contains("imagegif"));
    }

    #[test]
    fn unadvertised_format_is_missing() {
        let mut host = full_gd();
        host.image_formats = vec![ImageFormat::Gif, ImageFormat::Png];
        assert_eq!(
            JpegSupportRule.evaluate(&host).title(),
            "GD library jpeg support missing"
        );
    }

    #[test]
    fn failed_probe_is_broken() {
        let mut host = full_gd();
        host.broken_capabilities = vec![Capability::PngDecode, Capability::TrueColorImage];
        assert_eq!(PngSupportRule.evaluate(&host).title(), "GD library png support broken");
        assert_eq!(
            TrueColorRule.evaluate(&host).title(),
            "GD library true color support broken"
        );
        assert_eq!(GifSupportRule.evaluate(&host).severity(), Severity::Ok);
    }

    #[test]
    fn jpeg_is_never_probed() {
        let mut host = full_gd();
        host.broken_capabilities = Capability::ALL.to_vec();
        assert_eq!(JpegSupportRule.evaluate(&host).severity(), Severity::Ok);
    }

    #[test]
    fn freetype_ok_carries_note() {
        let status = FreeTypeRule.evaluate(&full_gd());
        assert_eq!(status.severity(), Severity::Ok);
        assert!(status.has_message());
    }
}
