use async_trait::async_trait;
use dao_utils::query_helpers::{first_row_or_not_found, like_pattern};
use database_traits::dao::GenericDao;
use product_commands::{CreateProductCommand, UpdateProductCommand};
use product_errors::ProductError;
use product_models::Product;
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct ProductDao {
    db: SqlConnect,
}

impl ProductDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    /// Products whose name contains `filter` as a substring, ordered
    /// ascending by name. An empty filter matches every row.
    #[instrument(skip(self))]
    pub async fn search_by_name(
        &self, filter: &str,
    ) -> Result<Vec<Product>, ProductError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, name, price, created_at, updated_at FROM \
                 products WHERE name LIKE $1 ORDER BY name ASC",
            )
            .await?;
        let rows = client.query(&stmt, &[&like_pattern(filter)]).await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }
}

#[async_trait]
impl GenericDao for ProductDao {
    type CreateRequest = CreateProductCommand;
    type Error = ProductError;
    type ID = i64;
    type Model = Product;
    type Response = Product;
    type UpdateRequest = UpdateProductCommand;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, name, price, created_at, updated_at FROM \
                 products WHERE id = $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ProductError::NotFound { product_id: id },
        )
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        self.search_by_name("").await
    }

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "INSERT INTO products (name, price) VALUES ($1, $2) \
                 RETURNING id, name, price, created_at, updated_at",
            )
            .await?;
        // The persisted name is always trimmed
        let row = client
            .query_one(&stmt, &[&req.name.trim(), &req.price])
            .await?;

        Ok(self.map_row(&row))
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        // Omitted price keeps the stored value; updated_at is always
        // refreshed by storage
        let stmt = client
            .prepare(
                "UPDATE products SET name = $1, price = COALESCE($2, \
                 price), updated_at = NOW() WHERE id = $3 RETURNING id, \
                 name, price, created_at, updated_at",
            )
            .await?;
        let rows = client
            .query(&stmt, &[&req.name.trim(), &req.price, &id])
            .await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ProductError::NotFound { product_id: id },
        )
    }

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare("DELETE FROM products WHERE id = $1")
            .await?;
        let rows = client.execute(&stmt, &[&id]).await?;

        if rows == 0 {
            return Err(ProductError::NotFound { product_id: id });
        }

        Ok(())
    }
}

impl ProductDao {
    fn map_row(&self, row: &tokio_postgres::Row) -> Product {
        Product {
            id: row.get(0),
            name: row.get(1),
            price: row.get(2),
            created_at: row.get(3),
            updated_at: row.get(4),
        }
    }
}
