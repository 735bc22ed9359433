//! Multipart form collection
//!
//! Reads a whole `multipart/form-data` body into text fields and file fields.
//! File fields whose name and content are both empty (an untouched file input)
//! count as absent.

use axum::{body::Bytes, extract::Multipart};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

/// A file part of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client; only its extension is ever used
    pub file_name: String,
    pub bytes: Bytes,
}

/// Text and file fields of a multipart body
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Text value of a field, if it was sent
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Integer value of a field; absent or blank fields are `None`
    pub fn int(&self, name: &'static str) -> ApiResult<Option<i32>> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|e: std::num::ParseIntError| ApiError::InvalidField {
                    field: name,
                    reason: e.to_string(),
                }),
        }
    }

    /// Remove and return a file field
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_fields() {
        let form = FormData::default()
            .with_field("price", " 20 ")
            .with_field("categoryid", "")
            .with_field("bad", "twenty");

        assert_eq!(form.int("price").unwrap(), Some(20));
        assert_eq!(form.int("categoryid").unwrap(), None);
        assert_eq!(form.int("missing").unwrap(), None);

        let err = form.int("bad").unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { field: "bad", .. }));
    }

    #[test]
    fn text_fields_are_kept_verbatim() {
        let form = FormData::default().with_field("name", "  Lamp ");
        assert_eq!(form.text("name").as_deref(), Some("  Lamp "));
        assert_eq!(form.text("description"), None);
    }
}
