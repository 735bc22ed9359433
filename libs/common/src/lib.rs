//! Common library for the shop API
//!
//! This crate provides the data access layer shared by the services: pool
//! configuration and lifecycle, parameter-bound statement execution, result
//! rows as JSON objects, and the database error taxonomy.

pub mod database;
pub mod error;
pub mod row;

pub use database::{Database, DatabaseConfig, SqlParam, Statement};
pub use error::{DatabaseError, DatabaseResult};
pub use row::JsonRow;
