use crate::order::ValidationError;

use super::types::{FileSlot, UploadRules, UploadedFile};

/// Both required files, checked against [`UploadRules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUploads {
    pub document: UploadedFile,
    pub payment: UploadedFile,
}

/// Checks size and type of a single file in `slot`.
pub fn validate_file(
    slot: FileSlot,
    file: &UploadedFile,
    rules: &UploadRules,
) -> Result<(), ValidationError> {
    rules.check_size(slot, file.size())?;

    let essence = file.essence();
    if !rules.accepts(slot, &essence) {
        return Err(ValidationError::UnsupportedFileType {
            slot,
            content_type: file.content_type.clone(),
            allowed: rules.allowed_document_labels(),
        });
    }

    Ok(())
}

/// Requires both files and validates each. The document is checked first.
pub fn validate_uploads(
    document: Option<UploadedFile>,
    payment: Option<UploadedFile>,
    rules: &UploadRules,
) -> Result<ValidatedUploads, ValidationError> {
    let document = document.ok_or(ValidationError::MissingFile(FileSlot::Document))?;
    validate_file(FileSlot::Document, &document, rules)?;

    let payment = payment.ok_or(ValidationError::MissingFile(FileSlot::Payment))?;
    validate_file(FileSlot::Payment, &payment, rules)?;

    Ok(ValidatedUploads { document, payment })
}

/// Collects file parts as they arrive, enforcing one file per slot.
#[derive(Debug, Default)]
pub struct UploadCollector {
    document: Option<UploadedFile>,
    payment: Option<UploadedFile>,
}

impl UploadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a file part received under `field_name`.
    ///
    /// Empty selections are skipped so that an unused file input reads as
    /// absent.
    pub fn accept(&mut self, field_name: &str, file: UploadedFile) -> Result<(), ValidationError> {
        let slot = FileSlot::from_field_name(field_name)
            .ok_or_else(|| ValidationError::UnexpectedFile(field_name.to_string()))?;

        if file.is_empty_selection() {
            return Ok(());
        }

        let target = match slot {
            FileSlot::Document => &mut self.document,
            FileSlot::Payment => &mut self.payment,
        };
        if target.is_some() {
            return Err(ValidationError::TooManyFiles(slot));
        }
        *target = Some(file);

        Ok(())
    }

    pub fn finish(self, rules: &UploadRules) -> Result<ValidatedUploads, ValidationError> {
        validate_uploads(self.document, self.payment, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> UploadedFile {
        UploadedFile::new("thesis.pdf", "application/pdf", b"%PDF-1.7".to_vec())
    }

    fn screenshot() -> UploadedFile {
        UploadedFile::new("upi.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    #[test]
    fn test_accepts_allowed_document_types() {
        let rules = UploadRules::default();
        for (name, mime) in [
            ("a.pdf", "application/pdf"),
            (
                "a.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            ("a.jpg", "image/jpeg"),
            ("a.png", "image/png"),
        ] {
            let file = UploadedFile::new(name, mime, vec![1, 2, 3]);
            assert!(validate_file(FileSlot::Document, &file, &rules).is_ok(), "{mime}");
        }
    }

    #[test]
    fn test_rejects_disallowed_document_type() {
        let rules = UploadRules::default();
        let file = UploadedFile::new("anim.gif", "image/gif", vec![1]);

        let error = validate_file(FileSlot::Document, &file, &rules).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Unsupported file type 'image/gif' for 'document'. Allowed types: PDF, DOCX, JPEG, PNG"
        );
    }

    #[test]
    fn test_rejects_oversized_document() {
        let rules = UploadRules {
            max_file_bytes: 4,
            ..UploadRules::default()
        };

        let error = validate_file(FileSlot::Document, &pdf(), &rules).unwrap_err();

        assert!(matches!(
            error,
            ValidationError::FileTooLarge {
                slot: FileSlot::Document,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_document_is_reported_first() {
        let error = validate_uploads(None, None, &UploadRules::default()).unwrap_err();
        assert_eq!(error, ValidationError::MissingFile(FileSlot::Document));
        assert!(error.to_string().contains("document"));
    }

    #[test]
    fn test_missing_payment() {
        let error = validate_uploads(Some(pdf()), None, &UploadRules::default()).unwrap_err();
        assert_eq!(error, ValidationError::MissingFile(FileSlot::Payment));
    }

    #[test]
    fn test_validate_uploads_ok() {
        let uploads = validate_uploads(Some(pdf()), Some(screenshot()), &UploadRules::default())
            .unwrap();
        assert_eq!(uploads.document.file_name, "thesis.pdf");
        assert_eq!(uploads.payment.file_name, "upi.jpg");
    }

    #[test]
    fn test_collector_rejects_second_file_in_slot() {
        let mut collector = UploadCollector::new();
        collector.accept("document", pdf()).unwrap();

        let error = collector.accept("document", pdf()).unwrap_err();

        assert_eq!(error, ValidationError::TooManyFiles(FileSlot::Document));
    }

    #[test]
    fn test_collector_rejects_unknown_field() {
        let mut collector = UploadCollector::new();
        let error = collector.accept("avatar", screenshot()).unwrap_err();
        assert_eq!(error, ValidationError::UnexpectedFile("avatar".to_string()));
    }

    #[test]
    fn test_collector_skips_empty_selection() {
        let mut collector = UploadCollector::new();
        collector
            .accept(
                "document",
                UploadedFile::new("", "application/octet-stream", Vec::new()),
            )
            .unwrap();
        collector.accept("payment", screenshot()).unwrap();

        let error = collector.finish(&UploadRules::default()).unwrap_err();

        assert_eq!(error, ValidationError::MissingFile(FileSlot::Document));
    }

    #[test]
    fn test_collector_finish_ok() {
        let mut collector = UploadCollector::new();
        collector.accept("payment", screenshot()).unwrap();
        collector.accept("document", pdf()).unwrap();

        let uploads = collector.finish(&UploadRules::default()).unwrap();

        assert_eq!(uploads.document, pdf());
        assert_eq!(uploads.payment, screenshot());
    }
}
