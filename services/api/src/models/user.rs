//! User models for the API service

use common::JsonRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of the `users` table
///
/// The password column is stored and returned in plaintext. Responses carry
/// whatever columns the table or procedure yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "johnnn")]
    pub username: Option<String>,
    #[schema(example = "john.doe@example.com")]
    pub email: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
    #[schema(example = "profile.jpg")]
    pub picture: Option<String>,
}

/// Request for user registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Response for user registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserCreatedResponse {
    /// Rows returned by `register_sp`, passed through as is
    #[schema(value_type = Vec<User>)]
    pub user: Vec<JsonRow>,
    pub message: String,
}
