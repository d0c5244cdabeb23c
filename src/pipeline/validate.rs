//! Size validation for form file fields.
//!
//! Each file field has a fixed byte threshold, checked at attach time so an
//! oversized file is rejected the moment the user picks it, not at submit.
//! The check is a pure function of the candidate's size and its threshold:
//! re-validating an accepted file yields the same verdict.
//!
//! An absent candidate is accepted silently — required-ness is a submit-time
//! concern handled by [`crate::form::FormState::to_request`], not by the
//! size validator.

use crate::error::CertigenError;
use crate::form::{FieldName, FilePart};

/// Byte threshold for the image field (20 MB).
pub const IMAGE_MAX_BYTES: u64 = 20 * 1024 * 1024;
/// Byte threshold for the spreadsheet field (4 MB).
pub const SPREADSHEET_MAX_BYTES: u64 = 4 * 1024 * 1024;
/// Byte threshold for the font field (2 MB).
pub const FONT_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// A field identity paired with its maximum accepted size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit {
    pub field: FieldName,
    pub max_bytes: u64,
}

impl SizeLimit {
    /// Limit for the image field.
    pub const IMAGE: SizeLimit = SizeLimit {
        field: FieldName::Image,
        max_bytes: IMAGE_MAX_BYTES,
    };

    /// Limit for the spreadsheet field.
    pub const SPREADSHEET: SizeLimit = SizeLimit {
        field: FieldName::Spreadsheet,
        max_bytes: SPREADSHEET_MAX_BYTES,
    };

    /// Limit for the font field.
    pub const FONT: SizeLimit = SizeLimit {
        field: FieldName::Font,
        max_bytes: FONT_MAX_BYTES,
    };
}

/// Check a candidate file against a field's size limit.
///
/// Returns the accepted candidate unchanged (including an absent one) or a
/// [`CertigenError::FileTooLarge`] naming the field and both sizes. The
/// caller owns what happens on rejection; [`crate::session::FormSession`]
/// clears the offending field and records the user-visible message.
pub fn check_size(
    candidate: Option<FilePart>,
    limit: SizeLimit,
) -> Result<Option<FilePart>, CertigenError> {
    match candidate {
        None => Ok(None),
        Some(part) if part.len() <= limit.max_bytes => Ok(Some(part)),
        Some(part) => Err(CertigenError::FileTooLarge {
            field: limit.field,
            actual_bytes: part.len(),
            max_bytes: limit.max_bytes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_of_len(len: usize) -> FilePart {
        FilePart::new("file.bin", vec![0u8; len])
    }

    #[test]
    fn absent_candidate_is_accepted() {
        assert!(matches!(check_size(None, SizeLimit::IMAGE), Ok(None)));
        assert!(matches!(check_size(None, SizeLimit::FONT), Ok(None)));
    }

    #[test]
    fn file_at_the_threshold_is_accepted() {
        let part = part_of_len(FONT_MAX_BYTES as usize);
        let accepted = check_size(Some(part), SizeLimit::FONT).unwrap();
        assert_eq!(accepted.unwrap().len(), FONT_MAX_BYTES);
    }

    #[test]
    fn file_over_the_threshold_is_rejected() {
        let part = part_of_len((SPREADSHEET_MAX_BYTES + 1) as usize);
        let err = check_size(Some(part), SizeLimit::SPREADSHEET).unwrap_err();
        match err {
            CertigenError::FileTooLarge {
                field,
                actual_bytes,
                max_bytes,
            } => {
                assert_eq!(field, FieldName::Spreadsheet);
                assert_eq!(actual_bytes, SPREADSHEET_MAX_BYTES + 1);
                assert_eq!(max_bytes, SPREADSHEET_MAX_BYTES);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn rejection_names_the_limit_field_not_the_part() {
        // The verdict is keyed by the limit passed in, so the same bytes can
        // be acceptable as an image and rejected as a font.
        let big = part_of_len((FONT_MAX_BYTES + 1) as usize);
        assert!(check_size(Some(big.clone()), SizeLimit::IMAGE).is_ok());
        let err = check_size(Some(big), SizeLimit::FONT).unwrap_err();
        assert!(matches!(
            err,
            CertigenError::FileTooLarge {
                field: FieldName::Font,
                ..
            }
        ));
    }

    #[test]
    fn validation_is_idempotent() {
        let part = part_of_len(1024);
        let first = check_size(Some(part), SizeLimit::IMAGE)
            .unwrap()
            .unwrap();
        let second = check_size(Some(first.clone()), SizeLimit::IMAGE)
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn thresholds_match_the_form_contract() {
        assert_eq!(SizeLimit::IMAGE.max_bytes, 20 * 1024 * 1024);
        assert_eq!(SizeLimit::SPREADSHEET.max_bytes, 4 * 1024 * 1024);
        assert_eq!(SizeLimit::FONT.max_bytes, 2 * 1024 * 1024);
    }
}
