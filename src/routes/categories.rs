use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::categories::{CategoryForm, CategoryUpload},
    error::AppResult,
    extract::{ApiMultipart, ApiQuery},
    models::Category,
    response::{ApiResponse, DeletedId, ErrorResponse},
    routes::params::SearchQuery,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/category",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
    ),
    responses(
        (status = 200, description = "All categories, newest first", body = ApiResponse<Vec<Category>>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let resp = category_service::list_categories(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/category/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Category>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::get_category(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/category",
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Missing name or malformed form", body = ErrorResponse),
        (status = 500, description = "Image upload or store failure", body = ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiMultipart(multipart): ApiMultipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let form = CategoryForm::from_multipart(multipart).await?;
    let resp = category_service::create_category(&state, form).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/category/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<Category>),
        (status = 400, description = "Malformed id or form", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiMultipart(multipart): ApiMultipart,
) -> AppResult<Json<ApiResponse<Category>>> {
    let form = CategoryForm::from_multipart(multipart).await?;
    let resp = category_service::update_category(&state, &id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/category/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Deleted category id", body = ApiResponse<DeletedId>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedId>>> {
    let resp = category_service::delete_category(&state, &id).await?;
    Ok(Json(resp))
}
