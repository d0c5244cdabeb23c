//! Form state: the four input values and the request they produce.
//!
//! [`FormState`] is a pure state container. Setters replace whatever the
//! field held before (a form input never accumulates files) and perform no
//! I/O and no validation — size checks live in
//! [`crate::pipeline::validate`] and are applied by
//! [`crate::session::FormSession`], which owns the clearing-on-rejection
//! policy. [`FormState::to_request`] is the single gate between loose form
//! state and a submittable [`UploadRequest`]: it checks presence of the
//! required fields and the font-size range, so an `UploadRequest` value is
//! submittable by construction.

use crate::error::CertigenError;
use std::fmt;
use std::path::Path;

/// Smallest font size the service accepts.
pub const FONT_SIZE_MIN: u16 = 1;
/// Largest font size the service accepts.
pub const FONT_SIZE_MAX: u16 = 999;

/// Identity of a form field.
///
/// Used in errors and in the validator so a rejection always names the field
/// it applies to, and clears only that field. The first three are file
/// fields; `FontSize` exists so a missing-fields error can name it too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Image,
    Spreadsheet,
    Font,
    FontSize,
}

impl FieldName {
    /// The label shown to users, matching the original form's alert wording.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Image => "Image",
            FieldName::Spreadsheet => "Excel",
            FieldName::Font => "Font file",
            FieldName::FontSize => "Font size",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An in-memory file: name, raw bytes, and the content type sent with its
/// multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    file_name: String,
    bytes: Vec<u8>,
    content_type: String,
}

impl FilePart {
    /// Wrap raw bytes as a file part, guessing the content type from the
    /// file name. Unknown extensions fall back to `application/octet-stream`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            file_name,
            bytes,
            content_type,
        }
    }

    /// Read a file from disk into a part.
    ///
    /// # Errors
    /// [`CertigenError::FileNotFound`] when the path does not exist,
    /// [`CertigenError::PermissionDenied`] when it cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CertigenError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => CertigenError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => CertigenError::FileNotFound {
                path: path.to_path_buf(),
            },
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte size, as compared against the field's [`SizeLimit`].
    ///
    /// [`SizeLimit`]: crate::pipeline::validate::SizeLimit
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Consume the part, yielding its raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The four input values of one form session.
///
/// All fields start empty. File setters take an `Option` so "user picked a
/// file" and "field was cleared" go through the same path.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    image: Option<FilePart>,
    spreadsheet: Option<FilePart>,
    font: Option<FilePart>,
    font_size: Option<u16>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the image field. `None` clears it.
    pub fn set_image(&mut self, part: Option<FilePart>) {
        self.image = part;
    }

    /// Replace the spreadsheet field. `None` clears it.
    pub fn set_spreadsheet(&mut self, part: Option<FilePart>) {
        self.spreadsheet = part;
    }

    /// Replace the optional font field. `None` clears it.
    pub fn set_font(&mut self, part: Option<FilePart>) {
        self.font = part;
    }

    /// Set the font size.
    ///
    /// # Errors
    /// [`CertigenError::FontSizeOutOfRange`] outside 1–999; the previous
    /// value is kept.
    pub fn set_font_size(&mut self, size: u16) -> Result<(), CertigenError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&size) {
            return Err(CertigenError::FontSizeOutOfRange {
                value: size as u32,
            });
        }
        self.font_size = Some(size);
        Ok(())
    }

    /// Clear the font size.
    pub fn clear_font_size(&mut self) {
        self.font_size = None;
    }

    pub fn image(&self) -> Option<&FilePart> {
        self.image.as_ref()
    }

    pub fn spreadsheet(&self) -> Option<&FilePart> {
        self.spreadsheet.as_ref()
    }

    pub fn font(&self) -> Option<&FilePart> {
        self.font.as_ref()
    }

    pub fn font_size(&self) -> Option<u16> {
        self.font_size
    }

    /// Build a submittable request from the current state.
    ///
    /// Presence is required for image, spreadsheet, and font size; the font
    /// file is optional. The error lists every missing field at once so the
    /// user fixes the form in one pass.
    ///
    /// # Errors
    /// [`CertigenError::MissingFields`] when a required field is absent.
    pub fn to_request(&self) -> Result<UploadRequest, CertigenError> {
        let mut missing = Vec::new();
        if self.image.is_none() {
            missing.push(FieldName::Image);
        }
        if self.spreadsheet.is_none() {
            missing.push(FieldName::Spreadsheet);
        }
        // Presence doubles as the range check here: set_font_size refuses
        // out-of-range values, so Some is always in 1-999.
        if self.font_size.is_none() {
            missing.push(FieldName::FontSize);
        }
        if let (Some(image), Some(spreadsheet), Some(font_size)) = (
            self.image.clone(),
            self.spreadsheet.clone(),
            self.font_size,
        ) {
            Ok(UploadRequest {
                image,
                spreadsheet,
                font: self.font.clone(),
                font_size,
            })
        } else {
            Err(CertigenError::MissingFields { missing })
        }
    }
}

/// A validated, submittable upload.
///
/// Only [`FormState::to_request`] constructs this, so holding one means the
/// required fields are present and the font size is in range. Size bounds
/// are enforced earlier, at attach time, by the session.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image: FilePart,
    pub spreadsheet: FilePart,
    pub font: Option<FilePart>,
    pub font_size: u16,
}

impl UploadRequest {
    /// Total payload size in bytes across all file parts.
    pub fn total_bytes(&self) -> u64 {
        self.image.len()
            + self.spreadsheet.len()
            + self.font.as_ref().map(|f| f.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, len: usize) -> FilePart {
        FilePart::new(name, vec![0u8; len])
    }

    #[test]
    fn setters_replace_previous_value() {
        let mut form = FormState::new();
        form.set_image(Some(part("first.png", 10)));
        form.set_image(Some(part("second.jpg", 20)));
        assert_eq!(form.image().unwrap().file_name(), "second.jpg");
        form.set_image(None);
        assert!(form.image().is_none());
    }

    #[test]
    fn content_type_guessed_from_name() {
        assert_eq!(part("cert.png", 1).content_type(), "image/png");
        assert_eq!(part("cert.jpg", 1).content_type(), "image/jpeg");
        assert_eq!(
            part("names.xlsx", 1).content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            part("mystery.unknownext", 1).content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn font_size_range_enforced() {
        let mut form = FormState::new();
        assert!(matches!(
            form.set_font_size(0),
            Err(CertigenError::FontSizeOutOfRange { value: 0 })
        ));
        assert!(form.set_font_size(1).is_ok());
        assert!(form.set_font_size(999).is_ok());
        assert!(form.set_font_size(1000).is_err());
        // a failed set keeps the previous value
        assert_eq!(form.font_size(), Some(999));
    }

    #[test]
    fn to_request_requires_image_spreadsheet_and_font_size() {
        let mut form = FormState::new();
        let err = form.to_request().unwrap_err();
        assert!(matches!(err, CertigenError::MissingFields { .. }));

        form.set_image(Some(part("cert.png", 10)));
        assert!(form.to_request().is_err());

        form.set_spreadsheet(Some(part("names.xlsx", 10)));
        assert!(form.to_request().is_err());

        form.set_font_size(24).unwrap();
        let request = form.to_request().expect("all required fields set");
        assert_eq!(request.font_size, 24);
        assert!(request.font.is_none());
    }

    #[test]
    fn font_is_optional_and_carried_when_present() {
        let mut form = FormState::new();
        form.set_image(Some(part("cert.png", 10)));
        form.set_spreadsheet(Some(part("names.xlsx", 10)));
        form.set_font_size(12).unwrap();

        assert!(form.to_request().unwrap().font.is_none());

        form.set_font(Some(part("custom.ttf", 30)));
        let request = form.to_request().unwrap();
        assert_eq!(request.total_bytes(), 50);
        assert_eq!(request.font.unwrap().file_name(), "custom.ttf");
    }
}
