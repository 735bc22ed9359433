//! Integration tests for the data access layer
//!
//! These tests need a reachable PostgreSQL instance at `DATABASE_URL`.
//! Run them with `cargo test -p common -- --ignored`.

use common::{
    Database, SqlParam, Statement,
    database::{DatabaseConfig, health_check, init_pool},
};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pool_and_bound_statements() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await, "Database health check failed");

    let database = Database::new(pool);

    // A quote in a bound value must come back untouched.
    let statement = Statement::query("SELECT $1::int4 AS number, $2::text AS word")
        .bind(7)
        .bind("it's");
    let rows = database.fetch_all(statement).await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["number"], json!(7));
    assert_eq!(rows[0]["word"], json!("it's"));

    let nulls = Statement::query("SELECT $1::int4 AS number, $2::text AS word")
        .bind(SqlParam::Int(None))
        .bind(SqlParam::Text(None));
    let rows = database.fetch_all(nulls).await?;
    assert_eq!(rows[0]["number"], Value::Null);
    assert_eq!(rows[0]["word"], Value::Null);

    database.close().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_rows_keep_every_column_type() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    let database = Database::new(pool);

    let statement = Statement::query(
        "SELECT true AS flag, 12.50::numeric AS price, 2.5::float8 AS ratio, \
         '{\"a\": 1}'::jsonb AS extra, DATE '2024-01-31' AS day, \
         9000000000::int8 AS big, ARRAY[1, 2] AS list",
    );
    let rows = database.fetch_all(statement).await?;

    let row = &rows[0];
    assert_eq!(row["flag"], json!(true));
    assert_eq!(row["price"], json!(12.5));
    assert_eq!(row["ratio"], json!(2.5));
    assert_eq!(row["extra"], json!({"a": 1}));
    assert_eq!(row["day"], json!("2024-01-31"));
    assert_eq!(row["big"], json!(9_000_000_000_i64));
    assert_eq!(row["list"], Value::Null);
    assert_eq!(row.len(), 7);

    database.close().await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_void_results_yield_no_rows() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    let database = Database::new(pool);

    let rows = database
        .fetch_all(Statement::query("SELECT * FROM pg_sleep(0)"))
        .await?;
    assert!(rows.is_empty());

    database.close().await;
    Ok(())
}
