use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Minimum length of a product name after trimming surrounding whitespace.
const NAME_MIN_LEN: usize = 6;

fn validate_name_length(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < NAME_MIN_LEN {
        return Err(ValidationError::new("min_length").with_message(
            Cow::Borrowed("name must be at least 6 characters"),
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductCommand {
    #[validate(custom(function = "validate_name_length"))]
    pub name: String,
    #[validate(range(
        exclusive_min = 0.0,
        message = "price must be greater than 0"
    ))]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductCommand {
    #[serde(skip)]
    pub product_id: i64,
    #[validate(custom(function = "validate_name_length"))]
    pub name: String,
    /// Omitted price leaves the stored value unchanged.
    #[validate(range(
        exclusive_min = 0.0,
        message = "price must be greater than 0"
    ))]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductCommand {
    pub product_id: i64,
}
