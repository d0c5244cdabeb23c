//! Multipart request body construction.
//!
//! The wire contract with the certificate service is four named parts:
//! `image`, `excel`, `font_file`, and `font_size`. The `font_file` part is
//! included iff a font was attached — an absent font must omit the part
//! entirely, never send an empty one, because the service treats the part's
//! presence as "use this font instead of the default".

use crate::error::CertigenError;
use crate::form::{FilePart, UploadRequest};
use reqwest::multipart::{Form, Part};

/// Multipart field name for the image.
pub const PART_IMAGE: &str = "image";
/// Multipart field name for the spreadsheet.
pub const PART_EXCEL: &str = "excel";
/// Multipart field name for the optional font file.
pub const PART_FONT_FILE: &str = "font_file";
/// Multipart field name for the font size.
pub const PART_FONT_SIZE: &str = "font_size";

/// Build the multipart form for a submittable request.
///
/// The font size is sent as a stringified integer in a text part; file parts
/// carry their original file name and guessed content type.
pub fn build_form(request: &UploadRequest) -> Result<Form, CertigenError> {
    let mut form = Form::new()
        .part(PART_IMAGE, file_part(&request.image)?)
        .part(PART_EXCEL, file_part(&request.spreadsheet)?);

    if let Some(ref font) = request.font {
        form = form.part(PART_FONT_FILE, file_part(font)?);
    }

    Ok(form.text(PART_FONT_SIZE, request.font_size.to_string()))
}

/// Convert a [`FilePart`] into a reqwest part, byte-for-byte.
fn file_part(part: &FilePart) -> Result<Part, CertigenError> {
    Part::bytes(part.bytes().to_vec())
        .file_name(part.file_name().to_string())
        .mime_str(part.content_type())
        .map_err(|e| CertigenError::Internal(format!("invalid content type: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    fn submittable(with_font: bool) -> UploadRequest {
        let mut form = FormState::new();
        form.set_image(Some(FilePart::new("cert.png", vec![1, 2, 3])));
        form.set_spreadsheet(Some(FilePart::new("names.xlsx", vec![4, 5])));
        if with_font {
            form.set_font(Some(FilePart::new("custom.ttf", vec![6])));
        }
        form.set_font_size(24).unwrap();
        form.to_request().unwrap()
    }

    #[test]
    fn builds_form_without_font() {
        // Part layout is asserted end-to-end in tests/submit.rs; here we
        // only check construction succeeds for both shapes.
        assert!(build_form(&submittable(false)).is_ok());
    }

    #[test]
    fn builds_form_with_font() {
        assert!(build_form(&submittable(true)).is_ok());
    }

    #[test]
    fn file_part_keeps_name_and_mime() {
        let part = FilePart::new("cert.png", vec![9; 16]);
        assert!(file_part(&part).is_ok());
        assert_eq!(part.content_type(), "image/png");
    }
}
