use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod category_service;
pub mod deal_service;
pub mod product_service;

/// Only canonical hyphenated ids are accepted; anything else is a 400, not a
/// lookup miss.
pub fn parse_object_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    let id = Uuid::try_parse(raw).map_err(|_| AppError::invalid_id(entity))?;
    if !id.hyphenated().to_string().eq_ignore_ascii_case(raw) {
        return Err(AppError::invalid_id(entity));
    }
    Ok(id)
}
