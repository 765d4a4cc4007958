//! File classification by extension.
//!
//! The editor groups files into coarse application categories (image, audio,
//! video, ...) and shows a short human-readable type label next to each file.
//! Both are derived from the file name's extension, with the MIME type as a
//! fallback for the category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Coarse application category of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Raster or vector images.
    Image,
    /// Audio files.
    Audio,
    /// Video files.
    Video,
    /// Office documents, PDFs and plain text.
    Document,
    /// Compressed archives.
    Archive,
    /// Legacy Flash content.
    Flash,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
            Self::Document => write!(f, "document"),
            Self::Archive => write!(f, "archive"),
            Self::Flash => write!(f, "flash"),
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "svg", "ico", "avif",
];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "wav", "ogg", "oga", "flac", "aif", "aiff"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "avi", "mkv", "mpg", "mpeg", "ogv", "wmv"];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "txt", "csv", "rtf",
    "md",
];

const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "gz", "tgz", "tar", "bz2", "7z", "rar"];

const FLASH_EXTENSIONS: &[&str] = &["swf", "fla"];

/// Human-readable labels for the extensions the editor commonly sees.
const TYPE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("jpg", "JPEG image - good for photos"),
    ("jpeg", "JPEG image - good for photos"),
    ("png", "PNG image - good general-purpose format"),
    ("gif", "GIF image - good for diagrams"),
    ("webp", "WebP image - good for photos and graphics"),
    ("svg", "SVG image - vector graphics"),
    ("bmp", "Bitmap image"),
    ("tif", "Tagged image format"),
    ("tiff", "Tagged image format"),
    ("ico", "Icon image"),
    ("mp3", "MP3 audio file"),
    ("m4a", "MPEG-4 audio file"),
    ("wav", "WAV audio file"),
    ("ogg", "Ogg audio file"),
    ("flac", "FLAC audio file"),
    ("mp4", "MPEG-4 video file"),
    ("mov", "Apple QuickTime movie"),
    ("webm", "WebM video file"),
    ("avi", "AVI video file"),
    ("pdf", "Adobe Acrobat PDF file"),
    ("doc", "Word document"),
    ("docx", "Word document"),
    ("xls", "Excel spreadsheet"),
    ("xlsx", "Excel spreadsheet"),
    ("ppt", "PowerPoint presentation"),
    ("pptx", "PowerPoint presentation"),
    ("txt", "Plain text file"),
    ("csv", "Comma-separated values file"),
    ("zip", "ZIP compressed file"),
    ("gz", "GZIP compressed file"),
    ("tar", "Tar archive"),
    ("swf", "Flash file"),
];

/// Lowercased extension of a file name, if it has one.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Classify a file by its name, falling back to the MIME type.
///
/// # Examples
///
/// ```
/// use mediabridge_common::files::category_for;
/// use mediabridge_common::FileCategory;
///
/// assert_eq!(category_for("episode.mp3", None), Some(FileCategory::Audio));
/// assert_eq!(category_for("upload", Some("video/mp4")), Some(FileCategory::Video));
/// assert_eq!(category_for("notes.xyz", None), None);
/// ```
pub fn category_for(name: &str, mime_type: Option<&str>) -> Option<FileCategory> {
    if let Some(ext) = extension_of(name) {
        let ext = ext.as_str();
        let by_extension = [
            (IMAGE_EXTENSIONS, FileCategory::Image),
            (AUDIO_EXTENSIONS, FileCategory::Audio),
            (VIDEO_EXTENSIONS, FileCategory::Video),
            (DOCUMENT_EXTENSIONS, FileCategory::Document),
            (ARCHIVE_EXTENSIONS, FileCategory::Archive),
            (FLASH_EXTENSIONS, FileCategory::Flash),
        ]
        .into_iter()
        .find(|(list, _)| list.contains(&ext))
        .map(|(_, category)| category);

        if by_extension.is_some() {
            return by_extension;
        }
    }

    match mime_type?.split('/').next()? {
        "image" => Some(FileCategory::Image),
        "audio" => Some(FileCategory::Audio),
        "video" => Some(FileCategory::Video),
        "text" => Some(FileCategory::Document),
        _ => None,
    }
}

/// Human-readable type label for a file name, e.g. `"JPEG image - good for photos"`.
///
/// Unknown extensions produce `"<EXT> file"`; names without an extension
/// produce `"unknown"`.
pub fn type_description(name: &str) -> String {
    let Some(ext) = extension_of(name) else {
        return "unknown".to_string();
    };

    TYPE_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| format!("{} file", ext.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_by_extension() {
        assert_eq!(category_for("a.jpeg", None), Some(FileCategory::Image));
        assert_eq!(category_for("a.PNG", None), Some(FileCategory::Image));
        assert_eq!(category_for("a.flac", None), Some(FileCategory::Audio));
        assert_eq!(category_for("a.mov", None), Some(FileCategory::Video));
        assert_eq!(category_for("a.pdf", None), Some(FileCategory::Document));
        assert_eq!(category_for("a.tar", None), Some(FileCategory::Archive));
        assert_eq!(category_for("a.swf", None), Some(FileCategory::Flash));
    }

    #[test]
    fn extension_wins_over_mime() {
        assert_eq!(
            category_for("cover.png", Some("application/octet-stream")),
            Some(FileCategory::Image)
        );
    }

    #[test]
    fn mime_fallback() {
        assert_eq!(category_for("blob", Some("image/heic")), Some(FileCategory::Image));
        assert_eq!(category_for("blob.bin", Some("audio/x-custom")), Some(FileCategory::Audio));
        assert_eq!(category_for("blob", Some("application/x-thing")), None);
        assert_eq!(category_for("blob", None), None);
    }

    #[test]
    fn descriptions() {
        assert_eq!(type_description("photo.JPG"), "JPEG image - good for photos");
        assert_eq!(type_description("report.pdf"), "Adobe Acrobat PDF file");
        assert_eq!(type_description("data.parquet"), "PARQUET file");
        assert_eq!(type_description("README"), "unknown");
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FileCategory::Image).unwrap(), "\"image\"");
        assert_eq!(FileCategory::Document.to_string(), "document");
    }
}
