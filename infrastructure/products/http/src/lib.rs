use axum::{
    Json, Router,
    extract::{FromRequest, Path, Query, Request, State},
    http::StatusCode,
    routing::{get, put},
};
use common_errors::AppError;
use product_command_handlers::{
    CreateProductHandler, DeleteProductHandler, UpdateProductHandler,
};
use product_commands::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand,
};
use product_queries::ListProductsQuery;
use product_query_handlers::ListProductsQueryHandler;
use product_responses::ProductResponse;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Clone)]
pub struct ProductServices {
    pub create_product: CreateProductHandler,
    pub update_product: UpdateProductHandler,
    pub delete_product: DeleteProductHandler,

    pub list_products: ListProductsQueryHandler,
}

impl ProductServices {
    pub fn new(db: sql_connection::SqlConnect) -> Self {
        Self {
            create_product: CreateProductHandler::new(db.clone()),
            update_product: UpdateProductHandler::new(db.clone()),
            delete_product: DeleteProductHandler::new(db.clone()),
            list_products: ListProductsQueryHandler::new(db),
        }
    }
}

/// The products route table. Lives next to the handlers so router-level
/// tests exercise exactly what the server mounts.
pub fn router(services: ProductServices) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .with_state(services)
}

/// JSON body extractor that runs schema validation before the handler
/// sees the value. Bodies that are not valid JSON for the target type
/// (missing or mistyped fields included) and bodies that fail a schema
/// rule both come back through the validation branch of `AppError`, so
/// every failure response stays JSON.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request, state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(data) =
            Json::<T>::from_request(req, state).await.map_err(
                |rejection| {
                    AppError::invalid_param(
                        "body",
                        "json",
                        &rejection.body_text(),
                    )
                },
            )?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

/// Path ids arrive as raw strings; anything that does not parse as an
/// integer is a client error, reported through the validation branch.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::invalid_param("id", "number", "id must be a number")
    })
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListProductsParams {
    /// Substring filter on product name
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    params(
        ListProductsParams
    ),
    responses(
        (status = 200, description = "Products ordered by name", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn list_products(
    State(services): State<ProductServices>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let query = ListProductsQuery { name: params.name };
    let products = services.list_products.execute(query).await?;

    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateProductCommand,
    responses(
        (status = 201, description = "Product created successfully"),
        (status = 400, description = "Invalid request data", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn create_product(
    State(services): State<ProductServices>,
    ValidatedJson(command): ValidatedJson<CreateProductCommand>,
) -> Result<StatusCode, AppError> {
    let result = services.create_product.execute(command).await?;

    tracing::info!("Product created: {}", result.id);

    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/{id}",
    request_body = UpdateProductCommand,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product updated successfully"),
        (status = 400, description = "Invalid request data", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Product not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn update_product(
    State(services): State<ProductServices>, Path(id): Path<String>,
    ValidatedJson(mut command): ValidatedJson<UpdateProductCommand>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    command.product_id = id;

    services.update_product.execute(command).await?;

    tracing::info!("Product updated: {}", id);

    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 400, description = "Invalid id parameter", body = common_errors::ApiErrorResponse),
        (status = 404, description = "Product not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "products"
)]
#[instrument(skip_all)]
pub async fn delete_product(
    State(services): State<ProductServices>, Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    let command = DeleteProductCommand { product_id: id };
    services.delete_product.execute(command).await?;

    tracing::info!("Product deleted: {}", id);

    Ok(StatusCode::OK)
}
