//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `grades.rs` - Inspection grade operations
//! - `restaurants.rs` - Restaurant operations
//!
//! Every call is a single statement against the pool; nothing is cached.

mod grades;
mod restaurants;

use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use crate::db::migrations::init_db;
    use crate::domain::{Address, NewRestaurant, Restaurant};
    use tempfile::TempDir;

    pub async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    pub async fn seed_restaurant(repo: &Repository, name: &str) -> Restaurant {
        repo.create_restaurant(&NewRestaurant {
            name: name.to_string(),
            borough: "Bronx".to_string(),
            cuisine: "Italian".to_string(),
            address: Address {
                building_number: Some("2335".to_string()),
                street: Some("Arthur Avenue".to_string()),
                zipcode: Some("10458".to_string()),
            },
        })
        .await
        .expect("create_restaurant failed")
    }
}
