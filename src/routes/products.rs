use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::{CreateProductRequest, ProductIdQuery, ProductQuery, UpdateProductRequest},
    error::AppResult,
    extract::{ApiJson, ApiQuery},
    models::Product,
    response::{ApiResponse, DeletedId, ErrorResponse, Page},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_product_by_query),
        )
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Items per page, default 10, max 100"),
        ("category" = Option<String>, Query, description = "Only products listing this category id"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
    ),
    responses(
        (status = 200, description = "Page of products, newest first", body = ApiResponse<Page<Product>>),
        (status = 400, description = "Malformed query", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> AppResult<Json<ApiResponse<Page<Product>>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Image upload or store failure", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Malformed id or field", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product id", body = ApiResponse<DeletedId>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedId>>> {
    let resp = product_service::delete_product(&state, &id).await?;
    Ok(Json(resp))
}

/// `DELETE /api/products?id=...`, the form the product page sends.
#[utoipa::path(
    delete,
    path = "/api/products",
    params(
        ("id" = String, Query, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product id", body = ApiResponse<DeletedId>),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn delete_product_by_query(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> AppResult<Json<ApiResponse<DeletedId>>> {
    let resp = product_service::delete_product(&state, &query.id).await?;
    Ok(Json(resp))
}
