//! Upload predicates.
//!
//! The engine never touches the filesystem. Callers describe each uploaded
//! file with an [`UploadedFile`] (typically filled in by the HTTP layer after
//! sniffing the MIME type and reading image dimensions) and hand the map to
//! [`FileRules`].

use super::RuleCall;
use crate::error::Result;
use crate::registry::RuleSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Upload status codes, numbered like the common multipart upload error
/// codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadError {
    /// The file was uploaded successfully
    #[default]
    Ok = 0,
    /// The file exceeds the server's size limit
    IniSize = 1,
    /// The file exceeds the form's size limit
    FormSize = 2,
    /// The file was only partially uploaded
    Partial = 3,
    /// No file was uploaded
    NoFile = 4,
    /// The temporary folder is missing
    NoTmpDir = 6,
    /// The file could not be written
    CantWrite = 7,
    /// An extension stopped the upload
    Extension = 8,
}

impl UploadError {
    /// Map a numeric upload error code.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            1 => Self::IniSize,
            2 => Self::FormSize,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTmpDir,
            7 => Self::CantWrite,
            8 => Self::Extension,
            _ => return None,
        })
    }

    /// Numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Metadata for one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Client-side file name
    pub name: String,
    /// Temporary storage location
    pub tmp_name: String,
    /// Size in bytes
    pub size: u64,
    /// Upload status
    #[serde(default)]
    pub error: UploadError,
    /// Detected MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Image width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Image height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl UploadedFile {
    /// Describe a successful upload.
    pub fn new(name: impl Into<String>, tmp_name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            tmp_name: tmp_name.into(),
            size,
            ..Self::default()
        }
    }

    /// Set the upload status.
    pub fn with_error(mut self, error: UploadError) -> Self {
        self.error = error;
        self
    }

    /// Set the detected MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Set image dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Whether the upload completed.
    pub fn is_uploaded(&self) -> bool {
        self.error == UploadError::Ok && !self.tmp_name.is_empty()
    }

    /// Detected MIME type or `application/octet-stream`.
    pub fn mime(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(FALLBACK_MIME)
    }

    /// Image dimensions if both are known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Uploaded files keyed by field path (`avatar`, `docs[passport]`).
pub type UploadedFiles = HashMap<String, UploadedFile>;

/// Upload predicates over caller-supplied file metadata.
///
/// Every rule except `uploaded` first requires the file to be uploaded; the
/// dimension rules additionally require an image.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    files: Arc<UploadedFiles>,
}

impl FileRules {
    pub const NAME: &'static str = "files";

    const RULES: [&'static str; 8] = [
        "uploaded", "maxSize", "mimes", "ext", "image", "maxDim", "minDim", "dim",
    ];

    pub fn new(files: UploadedFiles) -> Self {
        Self {
            files: Arc::new(files),
        }
    }

    /// Metadata for `field`, if any was supplied.
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.get(field)
    }

    pub fn files(&self) -> &UploadedFiles {
        &self.files
    }

    fn uploaded(&self, call: &RuleCall<'_>) -> Option<&UploadedFile> {
        self.file(call.field).filter(|file| file.is_uploaded())
    }

    fn image(&self, call: &RuleCall<'_>) -> Option<&UploadedFile> {
        self.uploaded(call)
            .filter(|file| file.mime().starts_with("image/"))
    }

    fn max_size(&self, call: &RuleCall<'_>) -> Result<bool> {
        let kilobytes = call.int_arg(0)?;
        Ok(self
            .uploaded(call)
            .is_some_and(|file| (file.size as i128) <= (kilobytes as i128) * 1024))
    }

    fn mimes(&self, call: &RuleCall<'_>) -> Result<bool> {
        call.arg(0)?;
        Ok(self
            .uploaded(call)
            .is_some_and(|file| call.args.iter().any(|allowed| allowed == file.mime())))
    }

    fn ext(&self, call: &RuleCall<'_>) -> Result<bool> {
        call.arg(0)?;
        Ok(self.uploaded(call).is_some_and(|file| {
            call.args
                .iter()
                .any(|extension| file.name.ends_with(&format!(".{extension}")))
        }))
    }

    fn dimension(
        &self,
        call: &RuleCall<'_>,
        accept: fn(i64, i64, i64, i64) -> bool,
    ) -> Result<bool> {
        let width = call.int_arg(0)?;
        let height = call.int_arg(1)?;
        Ok(self
            .image(call)
            .and_then(UploadedFile::dimensions)
            .is_some_and(|(w, h)| accept(w.into(), h.into(), width, height)))
    }
}

impl RuleSource for FileRules {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rule_names(&self) -> Vec<&str> {
        Self::RULES.to_vec()
    }

    fn has_rule(&self, rule: &str) -> bool {
        Self::RULES.contains(&rule)
    }

    fn call(&self, call: &RuleCall<'_>) -> Option<Result<bool>> {
        let result = match call.rule {
            "uploaded" => Ok(self.uploaded(call).is_some()),
            "maxSize" => self.max_size(call),
            "mimes" => self.mimes(call),
            "ext" => self.ext(call),
            "image" => Ok(self.image(call).is_some()),
            "maxDim" => self.dimension(call, |w, h, max_w, max_h| w <= max_w && h <= max_h),
            "minDim" => self.dimension(call, |w, h, min_w, min_h| w >= min_w && h >= min_h),
            "dim" => self.dimension(call, |w, h, exact_w, exact_h| w == exact_w && h == exact_h),
            _ => return None,
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rules() -> FileRules {
        let mut files = UploadedFiles::new();
        files.insert(
            "avatar".to_string(),
            UploadedFile::new("me.png", "/tmp/php123", 2048)
                .with_mime_type("image/png")
                .with_dimensions(200, 100),
        );
        files.insert(
            "docs[cv]".to_string(),
            UploadedFile::new("cv.pdf", "/tmp/php456", 10_000).with_mime_type("application/pdf"),
        );
        files.insert(
            "broken".to_string(),
            UploadedFile::new("x.png", "", 0).with_error(UploadError::Partial),
        );
        FileRules::new(files)
    }

    fn check(rule: &str, field: &str, args: &[&str]) -> bool {
        let data = Value::Null;
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let call = RuleCall::new(rule, field, &data, &args);
        rules().call(&call).unwrap().unwrap()
    }

    #[test]
    fn uploaded() {
        assert!(check("uploaded", "avatar", &[]));
        assert!(check("uploaded", "docs[cv]", &[]));
        assert!(!check("uploaded", "broken", &[]));
        assert!(!check("uploaded", "missing", &[]));
    }

    #[test]
    fn max_size_in_kilobytes() {
        assert!(check("maxSize", "avatar", &["2"]));
        assert!(!check("maxSize", "avatar", &["1"]));
        assert!(!check("maxSize", "broken", &["100"]));
    }

    #[test]
    fn mimes_and_extensions() {
        assert!(check("mimes", "docs[cv]", &["image/png", "application/pdf"]));
        assert!(!check("mimes", "avatar", &["application/pdf"]));
        assert!(check("ext", "avatar", &["jpg", "png"]));
        assert!(!check("ext", "docs[cv]", &["doc"]));
    }

    #[test]
    fn image_and_dimensions() {
        assert!(check("image", "avatar", &[]));
        assert!(!check("image", "docs[cv]", &[]));
        assert!(check("maxDim", "avatar", &["200", "100"]));
        assert!(!check("maxDim", "avatar", &["199", "100"]));
        assert!(check("minDim", "avatar", &["100", "50"]));
        assert!(!check("minDim", "avatar", &["300", "50"]));
        assert!(check("dim", "avatar", &["200", "100"]));
        assert!(!check("dim", "docs[cv]", &["200", "100"]));
    }

    #[test]
    fn empty_source_fails_every_rule() {
        let data = json!({ "avatar": "me.png" });
        let call = RuleCall::new("uploaded", "avatar", &data, &[]);
        assert!(!FileRules::default().call(&call).unwrap().unwrap());
    }

    #[test]
    fn upload_error_codes() {
        assert_eq!(UploadError::from_code(4), Some(UploadError::NoFile));
        assert_eq!(UploadError::from_code(5), None);
        assert_eq!(UploadError::Extension.code(), 8);
    }

    #[test]
    fn file_metadata_deserializes() {
        let file: UploadedFile = serde_json::from_value(json!({
            "name": "a.txt",
            "tmp_name": "/tmp/a",
            "size": 3,
            "error": "no_file"
        }))
        .unwrap();
        assert_eq!(file.error, UploadError::NoFile);
        assert!(!file.is_uploaded());
        assert_eq!(file.mime(), "application/octet-stream");
    }
}
