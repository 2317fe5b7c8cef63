use std::{path::{Path, PathBuf}, str::FromStr};

use actix_multipart::form::{tempfile::TempFile, text::Text};
use rust_decimal::Decimal;

use crate::errors::{AppError, FieldError};

pub const REQUIRED: &str = "This field is required";
pub const INVALID_IMAGE: &str = "Please upload a valid image file";
pub const INVALID_CHOICE: &str = "Select a valid choice";

/// Collects field-level problems of a multipart form so every missing or
/// malformed field is reported, not just the first one.
#[derive(Debug, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        FormErrors::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A required text field; blank input counts as missing.
    pub fn text(&mut self, field: &str, value: Option<Text<String>>) -> Option<String> {
        let value = optional_text(value);
        if value.is_none() {
            self.push(field, REQUIRED);
        }
        value
    }

    pub fn image(&mut self, field: &str, value: Option<TempFile>) -> Option<ImageUpload> {
        match value.filter(|file| file.size > 0) {
            None => {
                self.push(field, REQUIRED);
                None
            }
            Some(file) => {
                let upload = ImageUpload::from(file);
                if upload.is_image() {
                    Some(upload)
                } else {
                    self.push(field, INVALID_IMAGE);
                    None
                }
            }
        }
    }

    /// An optional image: absent is fine, present but not an image is not.
    pub fn optional_image(&mut self, field: &str, value: Option<TempFile>) -> Option<ImageUpload> {
        match value.filter(|file| file.size > 0) {
            None => None,
            Some(file) => self.image(field, Some(file)),
        }
    }

    pub fn choice<T: FromStr>(&mut self, field: &str, value: Option<Text<String>>) -> Option<T> {
        let raw = self.text(field, value)?;
        match raw.parse::<T>() {
            Ok(choice) => Some(choice),
            Err(_) => {
                self.push(field, INVALID_CHOICE);
                None
            }
        }
    }

    pub fn decimal(&mut self, field: &str, value: Option<Text<String>>) -> Option<Decimal> {
        let raw = optional_text(value)?;
        match raw.parse::<Decimal>() {
            Ok(amount) if !amount.is_sign_negative() => Some(amount.round_dp(2)),
            _ => {
                self.push(field, "Enter a valid non-negative amount");
                None
            }
        }
    }

    pub fn count(&mut self, field: &str, value: Option<Text<String>>) -> Option<i32> {
        let raw = optional_text(value)?;
        match raw.parse::<i32>() {
            Ok(count) if count >= 0 => Some(count),
            _ => {
                self.push(field, "Enter a whole number of zero or more");
                None
            }
        }
    }

    pub fn id(&mut self, field: &str, value: Option<Text<String>>) -> Option<i64> {
        let raw = self.text(field, value)?;
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                self.push(field, INVALID_CHOICE);
                None
            }
        }
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::ValidationError(errors.0)
    }
}

pub fn optional_text(value: Option<Text<String>>) -> Option<String> {
    value
        .map(|text| text.into_inner().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// An uploaded image waiting to be copied into the media store. The
/// multipart temp file is held so its path stays valid until the upload
/// is dropped.
#[derive(Debug)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    _temp: Option<TempFile>,
}

impl From<TempFile> for ImageUpload {
    fn from(file: TempFile) -> Self {
        ImageUpload {
            path: file.file.path().to_path_buf(),
            file_name: file.file_name.clone(),
            content_type: file.content_type.as_ref().map(|mime| mime.essence_str().to_string()),
            size: file.size,
            _temp: Some(file),
        }
    }
}

impl ImageUpload {
    pub fn from_path(
        path: impl Into<PathBuf>,
        file_name: Option<&str>,
        content_type: Option<&str>,
        size: usize,
    ) -> Self {
        ImageUpload {
            path: path.into(),
            file_name: file_name.map(String::from),
            content_type: content_type.map(String::from),
            size,
            _temp: None,
        }
    }

    /// Declared MIME type first, magic bytes when the client sent none.
    pub fn is_image(&self) -> bool {
        match self.content_type.as_deref() {
            Some(declared) if declared != "application/octet-stream" => declared.starts_with("image/"),
            _ => sniff(&self.path)
                .map(|kind| kind.matcher_type() == infer::MatcherType::Image)
                .unwrap_or(false),
        }
    }

    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_lowercase);

        if let Some(ext) = from_name {
            return ext;
        }

        match sniff(&self.path) {
            Some(kind) => kind.extension().to_string(),
            None => match self.content_type.as_deref() {
                Some("image/jpeg") => "jpg".to_string(),
                Some(ct) => ct.rsplit('/').next().unwrap_or("img").to_string(),
                None => "img".to_string(),
            },
        }
    }
}

fn sniff(path: &Path) -> Option<infer::Type> {
    infer::get_from_path(path).ok().flatten()
}
