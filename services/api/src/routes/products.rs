//! Product endpoints

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use common::JsonRow;
use tracing::{info, warn};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        ErrorResponse, MessageResponse,
        product::{Product, ProductCreatedResponse, ProductInput, ProductUpload},
    },
    routes::form::FormData,
    storage::StoredFile,
};

/// Multipart field carrying the product image
pub const IMAGE_FIELD: &str = "image";

/// Get all products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "A list of products", body = Vec<Product>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<JsonRow>>> {
    let products = state.product_repository.get_all().await?;
    Ok(Json(products))
}

/// Add a product
///
/// The image is stored before the row is inserted. Without an image the row
/// is inserted with a null `image_url`.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created successfully", body = ProductCreatedResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let mut form = FormData::read(multipart).await?;
    let mut input = column_values(&form)?;

    let stored = match form.take_file(IMAGE_FIELD) {
        Some(file) => Some(state.image_store.store(&file.bytes, &file.file_name).await?),
        None => {
            warn!("Product submitted without an image, image_url will be null");
            None
        }
    };
    input.image_url = stored.as_ref().map(|file| file.public_path.clone());

    let product = state
        .product_repository
        .create(&input)
        .await
        .inspect_err(|_| log_orphan(stored.as_ref()))?;

    info!("Product {:?} added", input.name);

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            product,
            message: "Product has been added successfully!".to_string(),
        }),
    ))
}

/// Update a product
///
/// When no new image is attached the `image_url` form field is written back
/// unchanged, so callers must resend the current value.
#[utoipa::path(
    put,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "ID of the product to update")),
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated successfully", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    WithRejection(Path(product_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let mut form = FormData::read(multipart).await?;
    let mut input = column_values(&form)?;

    let stored = match form.take_file(IMAGE_FIELD) {
        Some(file) => Some(state.image_store.store(&file.bytes, &file.file_name).await?),
        None => None,
    };
    input.image_url = match &stored {
        Some(file) => Some(file.public_path.clone()),
        None => form.text("image_url"),
    };

    state
        .product_repository
        .update(product_id, &input)
        .await
        .inspect_err(|_| log_orphan(stored.as_ref()))?;

    info!("Product {} updated", product_id);

    Ok(Json(MessageResponse::new(
        "Product has been updated successfully!",
    )))
}

/// Delete a product
///
/// Deleting an id that does not exist reports success as well.
#[utoipa::path(
    delete,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = i32, Path, description = "ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    WithRejection(Path(product_id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    state.product_repository.delete(product_id).await?;

    info!("Product {} deleted", product_id);

    Ok(Json(MessageResponse::new(
        "Product has been deleted successfully!",
    )))
}

/// Column values shared by create and update; `image_url` is filled in later
fn column_values(form: &FormData) -> Result<ProductInput, ApiError> {
    Ok(ProductInput {
        name: form.text("name"),
        description: form.text("description"),
        price: form.int("price")?,
        image_url: None,
        categoryid: form.int("categoryid")?,
    })
}

fn log_orphan(stored: Option<&StoredFile>) {
    if let Some(file) = stored {
        warn!(
            "Database call failed after storing {}, the file is now orphaned",
            file.path.display()
        );
    }
}
