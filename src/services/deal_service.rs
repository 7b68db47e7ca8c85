use crate::{
    dto::deals::{CreateDealRequest, UpdateDealRequest},
    error::{AppError, AppResult},
    media::UploadFolder,
    models::Deal,
    response::{ApiResponse, DeletedId},
    routes::params::SearchQuery,
    services::parse_object_id,
    state::AppState,
    store::FindOptions,
};

const ENTITY: &str = "Deal";

pub async fn list_deals(state: &AppState, query: SearchQuery) -> AppResult<ApiResponse<Vec<Deal>>> {
    let deals = state.deals().find(query.term(), FindOptions::all()).await?;
    Ok(ApiResponse::success(deals))
}

pub async fn get_deal(state: &AppState, id: &str) -> AppResult<ApiResponse<Deal>> {
    let id = parse_object_id(id, ENTITY)?;
    let deal = state
        .deals()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    Ok(ApiResponse::success(deal))
}

/// The image is uploaded before the write; an upload failure leaves no deal behind.
pub async fn create_deal(
    state: &AppState,
    payload: CreateDealRequest,
) -> AppResult<ApiResponse<Deal>> {
    let (mut deal, image) = payload.validate()?;
    deal.image = image
        .resolve(state.media.as_ref(), UploadFolder::Deals)
        .await?;

    let deal = state.deals().create(deal).await?;
    tracing::info!(deal_id = %deal.id, "deal created");
    Ok(ApiResponse::success(deal))
}

pub async fn update_deal(
    state: &AppState,
    id: &str,
    payload: UpdateDealRequest,
) -> AppResult<ApiResponse<Deal>> {
    let id = parse_object_id(id, ENTITY)?;
    let (mut changes, image) = payload.validate()?;
    if let Some(image) = image {
        changes.image = Some(image.resolve(state.media.as_ref(), UploadFolder::Deals).await?);
    }

    let deal = state
        .deals()
        .find_by_id_and_update(id, changes)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(deal_id = %deal.id, "deal updated");
    Ok(ApiResponse::success(deal))
}

pub async fn delete_deal(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedId>> {
    let id = parse_object_id(id, ENTITY)?;
    let id = state
        .deals()
        .find_by_id_and_delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(deal_id = %id, "deal deleted");
    Ok(ApiResponse::success(DeletedId { id }))
}
