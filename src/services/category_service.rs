use crate::{
    dto::categories::CategoryForm,
    error::{AppError, AppResult},
    media::{ImageRef, UploadError, UploadFolder},
    models::{Category, CategoryImage},
    response::{ApiResponse, DeletedId},
    routes::params::SearchQuery,
    services::parse_object_id,
    state::AppState,
    store::FindOptions,
};

const ENTITY: &str = "Category";

/// Categories keep the asset id next to the URL when the image was uploaded here.
async fn resolve_image(state: &AppState, image: ImageRef) -> Result<CategoryImage, UploadError> {
    match image {
        ImageRef::Stored(url) => Ok(CategoryImage {
            asset_id: None,
            url,
        }),
        ImageRef::Embedded(embedded) => {
            let asset = state
                .media
                .upload(embedded, UploadFolder::Categories)
                .await?;
            Ok(CategoryImage {
                asset_id: Some(asset.asset_id),
                url: asset.url,
            })
        }
    }
}

pub async fn list_categories(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state
        .categories()
        .find(query.term(), FindOptions::all())
        .await?;
    Ok(ApiResponse::success(categories))
}

pub async fn get_category(state: &AppState, id: &str) -> AppResult<ApiResponse<Category>> {
    let id = parse_object_id(id, ENTITY)?;
    let category = state
        .categories()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    Ok(ApiResponse::success(category))
}

pub async fn create_category(
    state: &AppState,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    let (mut category, image) = form.validate_new()?;
    if let Some(image) = image {
        category.image = Some(resolve_image(state, image).await?);
    }

    let category = state.categories().create(category).await?;
    tracing::info!(category_id = %category.id, "category created");
    Ok(ApiResponse::success(category))
}

pub async fn update_category(
    state: &AppState,
    id: &str,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    let id = parse_object_id(id, ENTITY)?;
    let (mut changes, image) = form.validate_changes()?;
    if let Some(image) = image {
        changes.image = Some(resolve_image(state, image).await?);
    }

    let category = state
        .categories()
        .find_by_id_and_update(id, changes)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(category_id = %category.id, "category updated");
    Ok(ApiResponse::success(category))
}

/// Products that reference the category keep the dangling id.
pub async fn delete_category(state: &AppState, id: &str) -> AppResult<ApiResponse<DeletedId>> {
    let id = parse_object_id(id, ENTITY)?;
    let id = state
        .categories()
        .find_by_id_and_delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY))?;
    tracing::info!(category_id = %id, "category deleted");
    Ok(ApiResponse::success(DeletedId { id }))
}
