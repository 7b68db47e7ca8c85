use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductQuery, UpdateProductRequest},
    error::{AppError, AppResult},
    media::UploadFolder,
    models::Product,
    response::{ApiResponse, DeletedId, Page, Pagination},
    services::parse_object_id,
    state::AppState,
    store::{FindOptions, ProductFilter},
};

const ENTITY: &str = "Product";

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<Page<Product>>> {
    let (page, limit, skip) = query.pagination().normalize();
    let filter = ProductFilter {
        category: query
            .category
            .as_deref()
            .and_then(|c| Uuid::try_parse(c.trim()).ok()),
        search: query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    let store = state.products();
    let total = store.count_documents(&filter).await?;
    let data = store.find(&filter, FindOptions::page(skip, limit)).await?;

    Ok(ApiResponse::success(Page {
        data,
        pagination: Pagination::new(page, limit, total),
    }))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let id = parse_object_id(id, ENTITY)?;
    let product = state
        .products()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    Ok(ApiResponse::success(product))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let (mut product, image) = payload.validate()?;
    if let Some(image) = image {
        product.image = image
            .resolve(state.media.as_ref(), UploadFolder::Products)
            .await?;
    }

    let product = state.products().create(product).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(ApiResponse::success(product))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let id = parse_object_id(id, ENTITY)?;
    let (mut changes, image) = payload.validate()?;
    if let Some(image) = image {
        changes.image = Some(
            image
                .resolve(state.media.as_ref(), UploadFolder::Products)
                .await?,
        );
    }

    let product = state
        .products()
        .find_by_id_and_update(id, changes)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(product_id = %product.id, "product updated");
    Ok(ApiResponse::success(product))
}

pub async fn delete_product(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedId>> {
    let id = parse_object_id(id, ENTITY)?;
    let id = state
        .products()
        .find_by_id_and_delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(ApiResponse::success(DeletedId { id }))
}
