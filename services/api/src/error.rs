//! Custom error types for the API service

use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{models::ErrorResponse, storage::StorageError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// The standalone upload endpoint received no `image` field
    #[error("No file uploaded.")]
    MissingUpload,

    /// A form field could not be converted to the column type
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The multipart body could not be read
    #[error("{0}")]
    Multipart(#[from] MultipartError),

    /// The request is not a multipart body
    #[error("{}", .0.body_text())]
    MultipartBody(#[from] MultipartRejection),

    /// A path segment could not be parsed
    #[error("{}", .0.body_text())]
    PathParam(#[from] PathRejection),

    /// The JSON body is missing or malformed
    #[error("{}", .0.body_text())]
    JsonBody(#[from] JsonRejection),

    /// Writing the uploaded file failed
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Database error
    #[error("{}", .0.raw_message())]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUpload => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::DatabaseError;

    #[test]
    fn database_errors_carry_the_raw_message() {
        let err = ApiError::from(DatabaseError::Bind("cannot encode".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "cannot encode");
    }

    #[test]
    fn rejections_are_server_errors() {
        let err = ApiError::from(JsonRejection::from(
            axum::extract::rejection::MissingJsonContentType::default(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("Content-Type: application/json"));
    }

    #[test]
    fn missing_upload_is_a_bad_request() {
        let response = ApiError::MissingUpload.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_field_is_a_server_error() {
        let err = ApiError::InvalidField {
            field: "price",
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'price': invalid digit found in string"
        );
    }
}
