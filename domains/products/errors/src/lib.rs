use common_errors::AppError;
use sql_connection::{PgError, PoolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound { product_id: i64 },
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] PoolError),
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { .. } => {
                AppError::not_found("product not found")
            }
            ProductError::Database(db_err) => {
                AppError::unexpected(&format!("Database error: {db_err}"))
            }
            ProductError::DatabasePool(pool_err) => {
                AppError::unexpected(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
        }
    }
}
