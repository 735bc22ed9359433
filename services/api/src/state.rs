//! Application state shared across handlers

use common::Database;

use crate::{
    repositories::{UserRepository, product::ProductRepository},
    storage::ImageStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub product_repository: ProductRepository,
    pub user_repository: UserRepository,
    pub image_store: ImageStore,
}

impl AppState {
    /// Build the repositories on top of one shared pool
    pub fn new(database: Database, image_store: ImageStore) -> Self {
        Self {
            product_repository: ProductRepository::new(database.clone()),
            user_repository: UserRepository::new(database.clone()),
            database,
            image_store,
        }
    }
}
