pub mod test_helpers;

use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{
    Manager, ManagerConfig, Pool as PostgresPool, RecyclingMethod,
};
pub use test_helpers::*;
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ImageExt, runners::AsyncRunner},
};
use tokio_postgres::NoTls;

/// Disposable PostgreSQL instance for tests.
pub struct TestPostgresContainer {
    pub pool: PostgresPool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container:
        testcontainers_modules::testcontainers::ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    /// Create a new PostgreSQL test container
    ///
    /// This will:
    /// 1. Start a fresh PostgreSQL container with a random port
    /// 2. Create a connection pool
    /// 3. Apply the products schema
    /// 4. Return a ready-to-use container
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string =
            format!("postgresql://testuser:testpass@{host}:{port}/testdb");

        let pool = Self::create_pool(&connection_string).await?;

        let instance = Self {
            pool,
            connection_string,
            _container: container,
        };

        instance.apply_migrations().await?;

        Ok(instance)
    }

    async fn create_pool(connection_string: &str) -> Result<PostgresPool> {
        let pg_config =
            connection_string.parse::<tokio_postgres::Config>()?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

        let pool = PostgresPool::builder(mgr)
            .max_size(10)
            .build()
            .context("Failed to build PostgreSQL connection pool")?;

        // Test the connection
        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(client) => {
                    match client.query_one("SELECT 1", &[]).await {
                        Ok(_) => break,
                        Err(_) if attempts < 20 => {
                            attempts += 1;
                            tokio::time::sleep(Duration::from_millis(500))
                                .await;
                            continue;
                        }
                        Err(e) => {
                            return Err(e).context("PostgreSQL not ready");
                        }
                    }
                }
                Err(_) if attempts < 20 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
                Err(e) => {
                    return Err(e)
                        .context("Failed to get PostgreSQL connection");
                }
            }
        }

        Ok(pool)
    }

    async fn apply_migrations(&self) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(include_str!(
                "../../../domains/products/migrations/sql/001_create_products.sql"
            ))
            .await
            .context("Failed to apply products schema")?;
        Ok(())
    }
}
