use product_dao::ProductDao;
use product_errors::ProductError;
use product_queries::ListProductsQuery;
use product_responses::ProductResponse;
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct ListProductsQueryHandler {
    product_dao: ProductDao,
}

impl ListProductsQueryHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            product_dao: ProductDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListProductsQuery,
    ) -> Result<Vec<ProductResponse>, ProductError> {
        let filter = query.name.as_deref().unwrap_or("");
        let products = self.product_dao.search_by_name(filter).await?;

        Ok(products.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use test_utils::*;

    use super::*;

    #[tokio::test]
    async fn test_list_without_filter_returns_all_ordered() {
        let container = TestPostgresContainer::new().await.unwrap();
        let handler =
            ListProductsQueryHandler::new(create_sql_connect(&container));

        create_test_product(&container, "Widget One", 1.0)
            .await
            .unwrap();
        create_test_product(&container, "Amplifier", 2.0)
            .await
            .unwrap();

        let result = handler
            .execute(ListProductsQuery { name: None })
            .await
            .unwrap();

        let names: Vec<&str> =
            result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amplifier", "Widget One"]);
    }

    #[tokio::test]
    async fn test_list_with_filter_returns_matching_subset() {
        let container = TestPostgresContainer::new().await.unwrap();
        let handler =
            ListProductsQueryHandler::new(create_sql_connect(&container));

        create_test_product(&container, "Red Widget", 1.0)
            .await
            .unwrap();
        create_test_product(&container, "Green Gadget", 2.0)
            .await
            .unwrap();

        let result = handler
            .execute(ListProductsQuery {
                name: Some("Widget".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Red Widget");
    }

    #[tokio::test]
    async fn test_list_on_empty_table_is_empty() {
        let container = TestPostgresContainer::new().await.unwrap();
        let handler =
            ListProductsQueryHandler::new(create_sql_connect(&container));

        let result = handler
            .execute(ListProductsQuery { name: None })
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
