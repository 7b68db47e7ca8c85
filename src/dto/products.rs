use serde::Deserialize;
use utoipa::ToSchema;

use super::{normalize_categories, optional_number, parse_image, required_text, validate_price};
use crate::{
    error::{AppError, AppResult},
    media::ImageRef,
    models::{NewProduct, ProductChanges},
    routes::params::Pagination,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    /// A URL, or a `data:image/...;base64,` payload to upload.
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
    /// Blank clears the image; a data URI is uploaded first.
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Category id; ignored unless it is a well-formed id.
    pub category: Option<String>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductIdQuery {
    pub id: String,
}

impl CreateProductRequest {
    /// Returns the product with an empty image plus the image still to resolve.
    pub fn validate(self) -> AppResult<(NewProduct, Option<ImageRef>)> {
        let name = required_text(self.name, "Product name is required")?;
        let description = required_text(self.description, "Product description is required")?;
        let price = self
            .price
            .ok_or_else(|| AppError::validation("Price is required"))
            .and_then(validate_price)?;
        let categories = normalize_categories(self.categories.unwrap_or_default());
        if categories.is_empty() {
            return Err(AppError::validation("At least one category is required"));
        }
        let image = match self.image.as_deref() {
            Some(raw) => parse_image(raw)?,
            None => None,
        };

        let product = NewProduct {
            name,
            description: Some(description),
            price,
            categories,
            image: String::new(),
        };
        Ok((product, image))
    }
}

impl UpdateProductRequest {
    /// Validates only the fields that were sent, with the same rules as
    /// create: a sent name or description must not be blank and a sent
    /// category list must keep at least one id. Only the image may be cleared.
    pub fn validate(self) -> AppResult<(ProductChanges, Option<ImageRef>)> {
        let mut changes = ProductChanges::default();

        if let Some(name) = self.name {
            changes.name = Some(required_text(Some(name), "Product name is required")?);
        }
        if let Some(description) = self.description {
            changes.description = Some(required_text(
                Some(description),
                "Product description is required",
            )?);
        }
        if let Some(price) = self.price {
            changes.price = Some(validate_price(price)?);
        }
        if let Some(categories) = self.categories {
            let categories = normalize_categories(categories);
            if categories.is_empty() {
                return Err(AppError::validation("At least one category is required"));
            }
            changes.categories = Some(categories);
        }

        let mut image = None;
        if let Some(raw) = self.image {
            match parse_image(&raw)? {
                Some(parsed) => image = Some(parsed),
                None => changes.image = Some(String::new()),
            }
        }

        Ok((changes, image))
    }
}
