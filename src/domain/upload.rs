//! Format and size policy for uploaded photos.

/// Largest accepted photo, in bytes.
pub const MAX_PHOTO_BYTES: u64 = 512 * 1024;

/// Declared content types accepted for photos.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

pub const REJECTION_MSG: &str = "Formato inválido da imagem ou imagem muito grande";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Checks the declared MIME type and size of a stored photo.
///
/// The check trusts the `Content-Type` sent with the multipart field; the bytes
/// themselves are never sniffed.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_bytes: u64,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self {
            max_bytes: MAX_PHOTO_BYTES,
        }
    }
}

/// Essence of a content type: parameters dropped, trimmed, lowercased.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl UploadValidator {
    pub fn check(&self, mime_type: Option<&str>, size: u64) -> Verdict {
        let format_ok = mime_type
            .map(essence)
            .map(|m| ACCEPTED_MIME_TYPES.contains(&m.as_str()))
            .unwrap_or(false);
        if !format_ok || size > self.max_bytes {
            return Verdict::Rejected(REJECTION_MSG.to_string());
        }
        Verdict::Accepted
    }
}
