//! API models for request and response payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod product;
pub mod user;

/// Response carrying only a confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Raw message of the failure
    #[schema(example = "relation \"product\" does not exist")]
    pub error: String,
}

/// Response of the standalone upload endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[serde(rename = "imagePath")]
    #[schema(example = "/uploads/1718000000000.png")]
    pub image_path: String,
}

/// Multipart body accepted by the standalone upload endpoint
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
