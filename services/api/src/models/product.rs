//! Product models for the API service

use common::JsonRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of the `Product` table
///
/// Handlers return rows with every column the database yields; this struct
/// documents and reads the columns the service itself writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lamp")]
    pub name: Option<String>,
    #[schema(example = "Desk lamp")]
    pub description: Option<String>,
    #[schema(example = 20)]
    pub price: Option<i32>,
    #[schema(example = "/uploads/1718000000000.png")]
    pub image_url: Option<String>,
    #[schema(example = 2)]
    pub categoryid: Option<i32>,
}

/// Column values handed to the add/update procedures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub image_url: Option<String>,
    pub categoryid: Option<i32>,
}

/// Response for product creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCreatedResponse {
    /// Rows returned by `addproduct_sp`, empty when it returns nothing
    #[schema(value_type = Vec<Product>)]
    pub product: Vec<JsonRow>,
    pub message: String,
}

/// Multipart body accepted by product create and update
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductUpload {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub categoryid: i32,
    /// Image file; optional on update
    #[schema(value_type = String, format = Binary)]
    pub image: Option<Vec<u8>>,
    /// Existing image path reused on update when no new image is sent
    pub image_url: Option<String>,
}
