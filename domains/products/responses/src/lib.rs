use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<product_models::Product> for ProductResponse {
    fn from(product: product_models::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
