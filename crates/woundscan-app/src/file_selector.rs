//! Image staging with type/size validation and local preview
//!
//! At most one image is staged at a time. A rejected candidate never
//! disturbs the image already staged.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use woundscan_core::prelude::*;
use woundscan_core::{StagedFile, ValidationError, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user picked, not yet validated
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl CandidateFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, deriving the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::image_not_found(path));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes_at(path, bytes))
    }

    /// Async variant of [`CandidateFile::from_path`] for use inside tasks
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(Error::image_not_found(path));
        }
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes_at(path, bytes))
    }

    fn from_bytes_at(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            file_name,
            mime_type: mime_type_for_path(path).to_string(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// MIME type for a path, judged by extension only
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}

/// Check a candidate against the allow-list and the size limit.
///
/// Type is checked first, so an oversized GIF reports `UnsupportedType`.
pub fn validate(candidate: &CandidateFile) -> std::result::Result<(), ValidationError> {
    validate_with_limit(candidate, MAX_UPLOAD_BYTES)
}

fn validate_with_limit(
    candidate: &CandidateFile,
    limit_bytes: u64,
) -> std::result::Result<(), ValidationError> {
    let mime = candidate.mime_type.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime_type: candidate.mime_type.clone(),
        });
    }

    let size_bytes = candidate.size_bytes();
    if size_bytes > limit_bytes {
        return Err(ValidationError::TooLarge {
            size_bytes,
            limit_bytes,
        });
    }

    Ok(())
}

/// Local preview of the staged image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
    /// Pixel size, when the header decodes
    pub dimensions: Option<(u32, u32)>,
}

impl Preview {
    fn of(file: &StagedFile) -> Self {
        Self {
            data_uri: format!(
                "data:{};base64,{}",
                file.mime_type,
                BASE64.encode(&file.raw_bytes)
            ),
            dimensions: image_dimensions(&file.raw_bytes),
        }
    }
}

fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Holds the single staged image
#[derive(Debug, Default)]
pub struct FileSelector {
    staged: Option<StagedFile>,
    preview: Option<Preview>,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and stage `candidate`, replacing any staged image.
    pub fn select(
        &mut self,
        candidate: CandidateFile,
    ) -> std::result::Result<&StagedFile, ValidationError> {
        if let Err(e) = validate(&candidate) {
            warn!("Rejected {}: {}", candidate.file_name, e);
            return Err(e);
        }

        let file = StagedFile {
            file_name: candidate.file_name,
            mime_type: candidate.mime_type.to_ascii_lowercase(),
            raw_bytes: candidate.bytes,
        };
        let preview = Preview::of(&file);
        debug!(
            "Staged {} ({}, dimensions {:?})",
            file.file_name,
            woundscan_core::format_bytes(file.size_bytes()),
            preview.dimensions
        );

        self.preview = Some(preview);
        Ok(self.staged.insert(file))
    }

    /// Drop the staged image. Returns whether anything was staged.
    pub fn clear(&mut self) -> bool {
        self.preview = None;
        self.staged.take().is_some()
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.staged.is_some()
    }
}
