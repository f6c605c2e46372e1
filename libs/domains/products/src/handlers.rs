//! HTTP handlers for Products API
//!
//! Every route is gated by a [`Validated`] rule set, so handlers only run
//! on input that already passed validation.

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    DataResponse, ErrorResponse, Validated, ValidationErrorResponse, Violation,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::messages;
use crate::models::{NewProduct, Product, ProductChanges};
use crate::repository::ProductRepository;
use crate::rules::{CreateProductRules, ProductIdRules, UpdateProductRules};
use crate::schema;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        toggle_availability,
        delete_product,
    ),
    components(
        schemas(Product, NewProduct, ProductChanges, Violation, ErrorResponse, ValidationErrorResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = DataResponse<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<DataResponse<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(DataResponse::new(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created successfully", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input, _): Validated<CreateProductRules>,
) -> ProductResult<impl IntoResponse> {
    let product = service
        .create_product(NewProduct::from_input(&input)?)
        .await?;
    Ok(DataResponse::created(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = DataResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input, _): Validated<ProductIdRules>,
) -> ProductResult<DataResponse<Product>> {
    let product = service.get_product(schema::product_id(&input)?).await?;
    Ok(DataResponse::new(product))
}

/// Replace a product's name, price and availability
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Product updated successfully", body = DataResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input, _): Validated<UpdateProductRules>,
) -> ProductResult<DataResponse<Product>> {
    let id = schema::product_id(&input)?;
    let product = service
        .update_product(id, ProductChanges::from_input(&input)?)
        .await?;
    Ok(DataResponse::new(product))
}

/// Toggle a product's availability
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Availability toggled", body = DataResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input, _): Validated<ProductIdRules>,
) -> ProductResult<DataResponse<Product>> {
    let product = service
        .toggle_availability(schema::product_id(&input)?)
        .await?;
    Ok(DataResponse::new(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = DataResponse<String>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Validated(input, _): Validated<ProductIdRules>,
) -> ProductResult<DataResponse<&'static str>> {
    service.delete_product(schema::product_id(&input)?).await?;
    Ok(DataResponse::new(messages::DELETED))
}
