//! API service routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{ErrorResponse, ImageUpload, UploadResponse},
    openapi::ApiDoc,
    routes::{form::FormData, products::IMAGE_FIELD},
    storage::UPLOADS_ROUTE,
};

pub mod form;
pub mod products;
pub mod users;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_ROUTE: &str = "/api-docs/openapi.json";
/// Path of the interactive documentation page
pub const API_UI_ROUTE: &str = "/api-ui";

/// Create the router for the API service
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.image_store.dir());

    let api_routes = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:product_id",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/users", get(users::list_users).post(users::register_user))
        .route("/users/:email/:password", get(users::login_user));

    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload_image))
        .nest("/api", api_routes)
        .nest_service(UPLOADS_ROUTE, uploads)
        .merge(RapiDoc::with_openapi(OPENAPI_JSON_ROUTE, ApiDoc::openapi()).path(API_UI_ROUTE))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(state.database.pool()).await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database { "ok" } else { "unavailable" },
            "service": "api-service",
            "database": database,
        })),
    )
}

/// Store a single image and return where it is served
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Uploads",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<Json<UploadResponse>> {
    let mut form = FormData::read(multipart).await?;
    let file = form
        .take_file(IMAGE_FIELD)
        .ok_or(ApiError::MissingUpload)?;

    let stored = state
        .image_store
        .store(&file.bytes, &file.file_name)
        .await?;

    Ok(Json(UploadResponse {
        image_path: stored.public_path,
    }))
}
