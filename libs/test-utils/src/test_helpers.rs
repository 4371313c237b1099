use anyhow::Result;
use sql_connection::SqlConnect;

use crate::TestPostgresContainer;

/// Create a SQL connection from a test container for use with DAOs and
/// handlers
pub fn create_sql_connect(container: &TestPostgresContainer) -> SqlConnect {
    SqlConnect::new(container.pool.clone())
}

/// Insert a product directly and return its generated id
pub async fn create_test_product(
    container: &TestPostgresContainer, name: &str, price: f64,
) -> Result<i64> {
    let client = container.pool.get().await?;
    let row = client
        .query_one(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING \
             id",
            &[&name, &price],
        )
        .await?;
    Ok(row.get(0))
}
