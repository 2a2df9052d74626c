//! File upload settings.

use crate::check::measure::{format_size, is_truthy, parse_size_bytes};
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// `file_uploads` must be on.
pub struct FileUploadsRule;

impl CheckRule for FileUploadsRule {
    fn id(&self) -> RuleId {
        RuleId::new("file-uploads")
    }

    fn name(&self) -> &str {
        "File Uploads"
    }

    fn description(&self) -> &str {
        "Checks that file uploads are enabled"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let value = env.config_value("file_uploads");
        if is_truthy(&value) {
            Status::ok("File uploads allowed")
        } else {
            Status::error("File uploads not allowed").with_message(format!(
                "file_uploads={}. With uploads disabled the server discards the whole \
                 content of multipart forms, so nothing in the backend can be edited.",
                value
            ))
        }
    }
}

/// `upload_max_filesize` must reach the profile minimum.
pub struct UploadMaxFilesizeRule {
    minimum: i64,
}

impl UploadMaxFilesizeRule {
    pub fn new(minimum: i64) -> Self {
        Self { minimum }
    }
}

impl CheckRule for UploadMaxFilesizeRule {
    fn id(&self) -> RuleId {
        RuleId::new("upload-max-filesize")
    }

    fn name(&self) -> &str {
        "Upload Size Ceiling"
    }

    fn description(&self) -> &str {
        "Checks that upload_max_filesize is large enough"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let raw = env.config_value("upload_max_filesize");
        let minimum = format_size(self.minimum);
        if parse_size_bytes(&raw) < self.minimum {
            Status::error(format!("Maximum upload file size below {}", minimum)).with_message(
                format!(
                    "upload_max_filesize={}. Files up to {} should be accepted; below that \
                     the runtime, not the application, limits uploaded file sizes.",
                    raw, minimum
                ),
            )
        } else {
            Status::ok(format!("Maximum upload file size is {} or more", minimum))
        }
    }
}

/// `post_max_size` must not be smaller than `upload_max_filesize`.
pub struct PostMaxSizeRule;

impl CheckRule for PostMaxSizeRule {
    fn id(&self) -> RuleId {
        RuleId::new("post-max-size")
    }

    fn name(&self) -> &str {
        "Request Body Ceiling"
    }

    fn description(&self) -> &str {
        "Checks that post_max_size is not smaller than upload_max_filesize"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let upload = env.config_value("upload_max_filesize");
        let post = env.config_value("post_max_size");
        if parse_size_bytes(&post) < parse_size_bytes(&upload) {
            Status::error("Upload size ceiling exceeds request body ceiling").with_message(format!(
                "upload_max_filesize={}, post_max_size={}. Uploads travel in the request \
                 body, so files cannot be larger than {} in practice.",
                upload, post, post
            ))
        } else {
            Status::ok("Request body ceiling covers the upload size ceiling")
        }
    }
}
