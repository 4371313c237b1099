use deadpool_postgres::{Object, Pool, PoolError};

use crate::static_vars::get_sql_pool;

/// Handle to the PostgreSQL pool. Cloned into every DAO so operations never
/// reach for ambient global state; tests build one from their own pool.
#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    pub fn from_global() -> Self {
        Self {
            pool: get_sql_pool().clone(),
        }
    }

    pub async fn get_client(&self) -> Result<Object, PoolError> {
        self.pool.get().await
    }

    /// Get pool statistics for monitoring
    pub fn get_pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.available, status.size)
    }
}
