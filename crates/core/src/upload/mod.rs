mod types;
mod validation;

pub use types::{AllowedType, FileSlot, UploadRules, UploadedFile, DOCUMENT_TYPES};
pub use validation::{validate_file, validate_uploads, UploadCollector, ValidatedUploads};
