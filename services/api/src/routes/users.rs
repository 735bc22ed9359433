//! User endpoints

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use axum_extra::extract::WithRejection;
use common::JsonRow;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        ErrorResponse,
        user::{RegisterUserRequest, User, UserCreatedResponse},
    },
};

/// Get all users
///
/// Rows include the password column as stored.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "A list of users", body = Vec<User>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<JsonRow>>> {
    let users = state.user_repository.get_all().await?;
    Ok(Json(users))
}

/// Get a user by email and password
///
/// Matching is left to `login_sp`; no match yields an empty array.
#[utoipa::path(
    get,
    path = "/api/users/{email}/{password}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "The email of the user"),
        ("password" = String, Path, description = "The password of the user")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    WithRejection(Path((email, password)), _): WithRejection<
        Path<(String, String)>,
        ApiError,
    >,
) -> ApiResult<Json<Vec<JsonRow>>> {
    let users = state
        .user_repository
        .find_by_credentials(&email, &password)
        .await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserCreatedResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterUserRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.user_repository.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            user,
            message: "User has been created successfully!".to_string(),
        }),
    ))
}
