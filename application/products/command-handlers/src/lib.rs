use database_traits::dao::GenericDao;
use product_commands::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand,
};
use product_dao::ProductDao;
use product_errors::ProductError;
use product_responses::ProductResponse;
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct CreateProductHandler {
    product_dao: ProductDao,
}

impl CreateProductHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            product_dao: ProductDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateProductCommand,
    ) -> Result<ProductResponse, ProductError> {
        let saved_product = self.product_dao.create(command).await?;

        Ok(saved_product.into())
    }
}

#[derive(Clone)]
pub struct UpdateProductHandler {
    product_dao: ProductDao,
}

impl UpdateProductHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            product_dao: ProductDao::new(db),
        }
    }

    /// Existence is checked with an explicit read before the write so a
    /// missing id surfaces as a named "product not found" failure instead
    /// of a zero-row update.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateProductCommand,
    ) -> Result<ProductResponse, ProductError> {
        let _existing =
            self.product_dao.find_by_id(command.product_id).await?;

        let updated_product = self
            .product_dao
            .update(command.product_id, command)
            .await?;

        Ok(updated_product.into())
    }
}

#[derive(Clone)]
pub struct DeleteProductHandler {
    product_dao: ProductDao,
}

impl DeleteProductHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            product_dao: ProductDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteProductCommand,
    ) -> Result<(), ProductError> {
        let _existing =
            self.product_dao.find_by_id(command.product_id).await?;

        self.product_dao.delete(command.product_id).await?;

        Ok(())
    }
}
