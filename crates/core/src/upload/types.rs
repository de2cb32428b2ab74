use std::fmt;

use crate::order::ValidationError;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Named file inputs of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSlot {
    /// The document to print.
    Document,
    /// Screenshot proving payment.
    Payment,
}

impl FileSlot {
    /// Multipart field name of this slot.
    pub fn field_name(&self) -> &'static str {
        match self {
            FileSlot::Document => "document",
            FileSlot::Payment => "payment",
        }
    }

    /// Looks up a slot by multipart field name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "document" => Some(FileSlot::Document),
            "payment" => Some(FileSlot::Payment),
            _ => None,
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A file received in a multipart submission, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename as sent by the browser.
    pub file_name: String,
    /// MIME type declared by the browser.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// True for the part a browser sends when the file input was left empty.
    pub fn is_empty_selection(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }

    /// Content type without parameters, lowercased (`image/PNG; x=y` -> `image/png`).
    pub fn essence(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// A MIME type accepted for the document slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedType {
    pub mime: &'static str,
    pub label: &'static str,
}

/// Document formats the print shop accepts.
pub const DOCUMENT_TYPES: [AllowedType; 4] = [
    AllowedType {
        mime: "application/pdf",
        label: "PDF",
    },
    AllowedType {
        mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        label: "DOCX",
    },
    AllowedType {
        mime: "image/jpeg",
        label: "JPEG",
    },
    AllowedType {
        mime: "image/png",
        label: "PNG",
    },
];

/// Limits applied to uploaded files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    /// Maximum size of a single file, in bytes.
    pub max_file_bytes: u64,
    /// MIME types accepted in the document slot.
    pub document_types: Vec<AllowedType>,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self::with_max_file_mb(10)
    }
}

impl UploadRules {
    pub fn with_max_file_mb(mb: u64) -> Self {
        Self {
            max_file_bytes: mb.saturating_mul(BYTES_PER_MB),
            document_types: DOCUMENT_TYPES.to_vec(),
        }
    }

    /// Size limit in whole megabytes, for messages.
    pub fn limit_mb(&self) -> u64 {
        self.max_file_bytes / BYTES_PER_MB
    }

    /// Rejects a file (or a partially read one) of `len` bytes in `slot`.
    pub fn check_size(&self, slot: FileSlot, len: u64) -> Result<(), ValidationError> {
        if len > self.max_file_bytes {
            return Err(ValidationError::FileTooLarge {
                slot,
                limit_mb: self.limit_mb(),
            });
        }
        Ok(())
    }

    /// Whether `slot` accepts a file of the given content type essence.
    pub fn accepts(&self, slot: FileSlot, essence: &str) -> bool {
        match slot {
            FileSlot::Document => self.document_types.iter().any(|t| t.mime == essence),
            FileSlot::Payment => true,
        }
    }

    /// Comma separated labels of the accepted document types.
    pub fn allowed_document_labels(&self) -> String {
        self.document_types
            .iter()
            .map(|t| t.label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for slot in [FileSlot::Document, FileSlot::Payment] {
            assert_eq!(FileSlot::from_field_name(slot.field_name()), Some(slot));
        }
        assert_eq!(FileSlot::from_field_name("avatar"), None);
    }

    #[test]
    fn test_default_limit_is_ten_megabytes() {
        let rules = UploadRules::default();
        assert_eq!(rules.max_file_bytes, 10 * 1024 * 1024);
        assert_eq!(rules.limit_mb(), 10);
    }

    #[test]
    fn test_check_size_boundary() {
        let rules = UploadRules::default();
        assert!(rules.check_size(FileSlot::Document, rules.max_file_bytes).is_ok());
        assert_eq!(
            rules.check_size(FileSlot::Document, rules.max_file_bytes + 1),
            Err(ValidationError::FileTooLarge {
                slot: FileSlot::Document,
                limit_mb: 10
            })
        );
    }

    #[test]
    fn test_essence_strips_parameters() {
        let file = UploadedFile::new("a.png", "Image/PNG; name=a.png", vec![1]);
        assert_eq!(file.essence(), "image/png");
    }

    #[test]
    fn test_payment_accepts_any_type() {
        let rules = UploadRules::default();
        assert!(rules.accepts(FileSlot::Payment, "image/webp"));
        assert!(!rules.accepts(FileSlot::Document, "image/webp"));
    }

    #[test]
    fn test_allowed_document_labels() {
        assert_eq!(
            UploadRules::default().allowed_document_labels(),
            "PDF, DOCX, JPEG, PNG"
        );
    }

    #[test]
    fn test_empty_selection() {
        let unselected = UploadedFile::new("", "application/octet-stream", Vec::new());
        let empty_pdf = UploadedFile::new("empty.pdf", "application/pdf", Vec::new());

        assert!(unselected.is_empty_selection());
        assert!(!empty_pdf.is_empty_selection());
    }
}
