//! Product repository for database operations

use common::{Database, DatabaseResult, JsonRow, SqlParam, Statement};
use tracing::debug;

use crate::models::product::ProductInput;

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    database: Database,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get all products
    pub async fn get_all(&self) -> DatabaseResult<Vec<JsonRow>> {
        self.database
            .fetch_all(Statement::query("SELECT * FROM Product"))
            .await
    }

    /// Insert a product through `addproduct_sp`, returning whatever rows it yields
    pub async fn create(&self, input: &ProductInput) -> DatabaseResult<Vec<JsonRow>> {
        self.database.fetch_all(add_statement(input)).await
    }

    /// Update a product through `updateproduct_sp`
    pub async fn update(&self, product_id: i32, input: &ProductInput) -> DatabaseResult<()> {
        let affected = self
            .database
            .execute(update_statement(product_id, input))
            .await?;
        debug!("updateproduct_sp({}) touched {} rows", product_id, affected);
        Ok(())
    }

    /// Delete a product through `deleteproduct_sp`; a missing id is not an error
    pub async fn delete(&self, product_id: i32) -> DatabaseResult<()> {
        let affected = self
            .database
            .execute(Statement::procedure(
                "deleteproduct_sp",
                vec![product_id.into()],
            ))
            .await?;
        debug!("deleteproduct_sp({}) touched {} rows", product_id, affected);
        Ok(())
    }
}

fn column_params(input: &ProductInput) -> Vec<SqlParam> {
    vec![
        input.name.clone().into(),
        input.description.clone().into(),
        input.price.into(),
        input.image_url.clone().into(),
        input.categoryid.into(),
    ]
}

fn add_statement(input: &ProductInput) -> Statement {
    Statement::procedure("addproduct_sp", column_params(input))
}

fn update_statement(product_id: i32, input: &ProductInput) -> Statement {
    let mut params: Vec<SqlParam> = vec![product_id.into()];
    params.extend(column_params(input));
    Statement::procedure("updateproduct_sp", params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> ProductInput {
        ProductInput {
            name: Some("Lamp".to_string()),
            description: Some("Desk lamp".to_string()),
            price: Some(20),
            image_url: Some("/uploads/1.png".to_string()),
            categoryid: Some(2),
        }
    }

    #[test]
    fn add_statement_binds_columns_in_procedure_order() {
        let statement = add_statement(&lamp());

        assert_eq!(statement.sql(), "SELECT * FROM addproduct_sp($1, $2, $3, $4, $5)");
        assert_eq!(
            statement.params(),
            &[
                SqlParam::Text(Some("Lamp".to_string())),
                SqlParam::Text(Some("Desk lamp".to_string())),
                SqlParam::Int(Some(20)),
                SqlParam::Text(Some("/uploads/1.png".to_string())),
                SqlParam::Int(Some(2)),
            ]
        );
    }

    #[test]
    fn update_statement_leads_with_the_id() {
        let statement = update_statement(7, &ProductInput::default());

        assert_eq!(
            statement.sql(),
            "SELECT * FROM updateproduct_sp($1, $2, $3, $4, $5, $6)"
        );
        assert_eq!(statement.params()[0], SqlParam::Int(Some(7)));
        assert!(statement.params()[1..].iter().all(|p| matches!(
            p,
            SqlParam::Int(None) | SqlParam::Text(None)
        )));
    }

    #[test]
    fn quotes_never_reach_the_statement_text() {
        let mut input = lamp();
        input.name = Some("Lamp', 0, NULL, 0); DROP TABLE Product; --".to_string());

        let statement = add_statement(&input);
        assert!(!statement.sql().contains("DROP"));
    }
}
