pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use sqlx::SqlitePool;

pub use config::Config;
pub use error::AppError;
pub use routes::app;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}
