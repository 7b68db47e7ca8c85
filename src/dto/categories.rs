use axum::extract::multipart::{Field, Multipart, MultipartError};
use utoipa::ToSchema;

use super::{parse_image, required_text};
use crate::{
    error::{AppError, AppResult},
    extract::rejection_error,
    media::{EmbeddedImage, ImageRef},
    models::{CategoryChanges, NewCategory},
};

/// Multipart body of `POST /api/category` and `PUT /api/category/{id}`.
#[derive(Debug, ToSchema)]
pub struct CategoryUpload {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Image file; a URL or data URI is also accepted as a text field.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// Fields read from the category form. Absent parts stay `None`.
#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
}

fn multipart_error(err: MultipartError) -> AppError {
    rejection_error(err.status(), err.body_text())
}

async fn read_image(field: Field<'_>) -> AppResult<Option<ImageRef>> {
    if field.file_name().is_none() {
        let text = field.text().await.map_err(multipart_error)?;
        return parse_image(&text);
    }

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(multipart_error)?;
    // Browsers send an empty file part when nothing was picked.
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageRef::Embedded(EmbeddedImage::new(
        content_type,
        bytes.to_vec(),
    ))))
}

impl CategoryForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = CategoryForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "name" => form.name = Some(field.text().await.map_err(multipart_error)?),
                "description" => {
                    form.description = Some(field.text().await.map_err(multipart_error)?)
                }
                "image" => form.image = read_image(field).await?,
                _ => {}
            }
        }
        Ok(form)
    }

    /// Returns the category without image plus the image still to resolve.
    pub fn validate_new(self) -> AppResult<(NewCategory, Option<ImageRef>)> {
        let name = required_text(self.name, "Category name is required")?;
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        let category = NewCategory {
            name,
            description,
            image: None,
        };
        Ok((category, self.image))
    }

    pub fn validate_changes(self) -> AppResult<(CategoryChanges, Option<ImageRef>)> {
        let mut changes = CategoryChanges::default();
        if let Some(name) = self.name {
            changes.name = Some(required_text(Some(name), "Category name is required")?);
        }
        if let Some(description) = self.description {
            changes.description = Some(description.trim().to_string());
        }
        Ok((changes, self.image))
    }
}
