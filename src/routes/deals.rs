use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::deals::{CreateDealRequest, UpdateDealRequest},
    error::AppResult,
    extract::{ApiJson, ApiQuery},
    models::Deal,
    response::{ApiResponse, DeletedId, ErrorResponse},
    routes::params::SearchQuery,
    services::deal_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deals).post(create_deal))
        .route("/{id}", get(get_deal).put(update_deal).delete(delete_deal))
}

#[utoipa::path(
    get,
    path = "/api/deals",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name, description or offer"),
    ),
    responses(
        (status = 200, description = "All deals, newest first", body = ApiResponse<Vec<Deal>>),
    ),
    tag = "Deals"
)]
pub async fn list_deals(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Deal>>>> {
    let resp = deal_service::list_deals(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    params(
        ("id" = String, Path, description = "Deal ID")
    ),
    responses(
        (status = 200, description = "Get deal", body = ApiResponse<Deal>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse),
    ),
    tag = "Deals"
)]
pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Deal>>> {
    let resp = deal_service::get_deal(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/deals",
    request_body = CreateDealRequest,
    responses(
        (status = 200, description = "Create deal", body = ApiResponse<Deal>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Image upload or store failure", body = ErrorResponse),
    ),
    tag = "Deals"
)]
pub async fn create_deal(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateDealRequest>,
) -> AppResult<Json<ApiResponse<Deal>>> {
    let resp = deal_service::create_deal(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/deals/{id}",
    params(
        ("id" = String, Path, description = "Deal ID")
    ),
    request_body = UpdateDealRequest,
    responses(
        (status = 200, description = "Updated deal", body = ApiResponse<Deal>),
        (status = 400, description = "Malformed id or field", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse),
    ),
    tag = "Deals"
)]
pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateDealRequest>,
) -> AppResult<Json<ApiResponse<Deal>>> {
    let resp = deal_service::update_deal(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/deals/{id}",
    params(
        ("id" = String, Path, description = "Deal ID")
    ),
    responses(
        (status = 200, description = "Deleted deal id", body = ApiResponse<DeletedId>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Deal not found", body = ErrorResponse),
    ),
    tag = "Deals"
)]
pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedId>>> {
    let resp = deal_service::delete_deal(&state, &id).await?;
    Ok(Json(resp))
}
