pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::{AppMode, Config};
pub use db::{init_db, Repository};
pub use domain::{Grade, GradeRepr, Restaurant, RestaurantRepr};
pub use error::AppError;
