//! Repositories for database operations
//!
//! Each repository maps one resource onto the stored procedures and plain
//! selects it is backed by. All values go through `Statement` parameters.

use common::{Database, DatabaseResult, JsonRow, Statement};
use tracing::info;

use crate::models::user::RegisterUserRequest;

pub mod product;

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    database: Database,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get all users
    pub async fn get_all(&self) -> DatabaseResult<Vec<JsonRow>> {
        self.database
            .fetch_all(Statement::query("SELECT * FROM users"))
            .await
    }

    /// Rows returned by `login_sp` for the given credentials
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DatabaseResult<Vec<JsonRow>> {
        info!("Credential lookup for {}", email);

        self.database
            .fetch_all(login_statement(email, password))
            .await
    }

    /// Register a user through `register_sp`
    pub async fn register(&self, payload: &RegisterUserRequest) -> DatabaseResult<Vec<JsonRow>> {
        info!(
            "Registering user {}",
            payload.username.as_deref().unwrap_or("<none>")
        );

        self.database.fetch_all(register_statement(payload)).await
    }
}

fn login_statement(email: &str, password: &str) -> Statement {
    Statement::procedure("login_sp", vec![email.into(), password.into()])
}

fn register_statement(payload: &RegisterUserRequest) -> Statement {
    Statement::procedure(
        "register_sp",
        vec![
            payload.username.clone().into(),
            payload.email.clone().into(),
            payload.password.clone().into(),
            payload.first_name.clone().into(),
            payload.last_name.clone().into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SqlParam;

    #[test]
    fn register_statement_keeps_field_order() {
        let payload = RegisterUserRequest {
            username: Some("johnnn".to_string()),
            email: Some("john.doe@example.com".to_string()),
            password: Some("password123".to_string()),
            first_name: Some("John".to_string()),
            last_name: None,
        };

        let statement = register_statement(&payload);

        assert_eq!(statement.sql(), "SELECT * FROM register_sp($1, $2, $3, $4, $5)");
        assert_eq!(statement.params()[0], SqlParam::Text(Some("johnnn".to_string())));
        assert_eq!(statement.params()[4], SqlParam::Text(None));
    }

    #[test]
    fn credentials_are_bound_not_interpolated() {
        let statement = login_statement("a@b.c", "' OR '1'='1");

        assert_eq!(statement.sql(), "SELECT * FROM login_sp($1, $2)");
        assert_eq!(
            statement.params()[1],
            SqlParam::Text(Some("' OR '1'='1".to_string()))
        );
    }
}
