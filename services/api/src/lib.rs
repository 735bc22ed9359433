//! Shop API service
//!
//! REST endpoints over the `Product` and `users` tables, image uploads served
//! back from a local directory, and a generated documentation page.

pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod storage;

pub use state::AppState;
