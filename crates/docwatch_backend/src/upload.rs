//! Client-side checks applied to files before they reach the upload form.

use std::fmt;

/// Largest accepted upload, 50 MiB.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 8] = ["pdf", "png", "jpg", "jpeg", "tiff", "bmp", "txt", "docx"];

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            allowed_extensions: ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadViolation {
    UnsupportedType { extension: String },
    TooLarge { size: u64, max: u64 },
}

impl fmt::Display for UploadViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadViolation::UnsupportedType { extension } => {
                write!(f, "File type not supported: {extension}")
            }
            UploadViolation::TooLarge { size, max } => {
                write!(
                    f,
                    "File too large: {} (max: {})",
                    format_file_size(*size),
                    format_file_size(*max)
                )
            }
        }
    }
}

impl UploadPolicy {
    pub fn is_allowed(&self, filename: &str) -> bool {
        let extension = file_extension(filename);
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    }

    /// Every reason the file would be refused, empty when it is acceptable.
    pub fn check(&self, filename: &str, size: u64) -> Vec<UploadViolation> {
        let mut violations = Vec::new();
        if !self.is_allowed(filename) {
            violations.push(UploadViolation::UnsupportedType {
                extension: file_extension(filename),
            });
        }
        if size > self.max_file_size {
            violations.push(UploadViolation::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        violations
    }
}

/// The final dot-separated segment of the name, lowercased. A name with no
/// dot yields the whole name, which the policy then refuses.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_ascii_lowercase()
}

/// Coarse grouping used when listing files on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Text,
    Other,
}

pub fn file_kind(filename: &str) -> FileKind {
    match file_extension(filename).as_str() {
        "pdf" => FileKind::Pdf,
        "png" | "jpg" | "jpeg" | "tiff" | "bmp" => FileKind::Image,
        "txt" | "docx" => FileKind::Text,
        _ => FileKind::Other,
    }
}

/// Human-readable base-1024 size: "0 Bytes", "1 KB", "1.5 KB", "50 MB".
/// Two decimals at most, trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / (1u64 << (10 * exponent)) as f64;

    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", UNITS[exponent as usize])
}
