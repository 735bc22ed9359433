//! Generated API description served at `/api-ui`

use utoipa::OpenApi;

use crate::models::{
    ErrorResponse, ImageUpload, MessageResponse, UploadResponse,
    product::{Product, ProductCreatedResponse, ProductUpload},
    user::{RegisterUserRequest, User, UserCreatedResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "CRUD over users and products with product image uploads"
    ),
    paths(
        crate::routes::products::list_products,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::users::list_users,
        crate::routes::users::login_user,
        crate::routes::users::register_user,
        crate::routes::upload_image,
    ),
    components(schemas(
        Product,
        ProductUpload,
        ProductCreatedResponse,
        User,
        RegisterUserRequest,
        UserCreatedResponse,
        MessageResponse,
        UploadResponse,
        ImageUpload,
        ErrorResponse,
    )),
    tags(
        (name = "Products", description = "Product management endpoints"),
        (name = "Users", description = "User listing, lookup and registration"),
        (name = "Uploads", description = "Image storage")
    )
)]
pub struct ApiDoc;
