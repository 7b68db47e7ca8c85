use serde::Deserialize;
use utoipa::ToSchema;

use super::{max_chars, optional_number, parse_image, required_text, validate_price};
use crate::{
    error::{AppError, AppResult},
    media::ImageRef,
    models::{DealChanges, NewDeal},
};

const MAX_NAME_CHARS: usize = 100;
const MAX_OFFER_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 1000;

const NAME_TOO_LONG: &str = "Deal name cannot exceed 100 characters";
const OFFER_TOO_LONG: &str = "Offer cannot exceed 50 characters";
const DESCRIPTION_TOO_LONG: &str = "Description cannot exceed 1000 characters";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDealRequest {
    pub name: Option<String>,
    /// Short promotional label such as "50% OFF".
    pub offer: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    /// A URL, or a `data:image/...;base64,` payload to upload.
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDealRequest {
    pub name: Option<String>,
    pub offer: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl CreateDealRequest {
    /// Returns the deal with an empty image plus the image still to resolve.
    pub fn validate(self) -> AppResult<(NewDeal, ImageRef)> {
        let name = required_text(self.name, "Deal name is required")?;
        max_chars(&name, MAX_NAME_CHARS, NAME_TOO_LONG)?;
        let offer = required_text(self.offer, "Offer is required")?;
        max_chars(&offer, MAX_OFFER_CHARS, OFFER_TOO_LONG)?;
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        max_chars(&description, MAX_DESCRIPTION_CHARS, DESCRIPTION_TOO_LONG)?;
        let price = self
            .price
            .ok_or_else(|| AppError::validation("Price is required"))
            .and_then(validate_price)?;
        let image = parse_image(self.image.as_deref().unwrap_or_default())?
            .ok_or_else(|| AppError::validation("Image URL is required"))?;

        let deal = NewDeal {
            name,
            offer,
            description,
            price,
            image: String::new(),
        };
        Ok((deal, image))
    }
}

impl UpdateDealRequest {
    pub fn validate(self) -> AppResult<(DealChanges, Option<ImageRef>)> {
        let mut changes = DealChanges::default();

        if let Some(name) = self.name {
            let name = required_text(Some(name), "Deal name is required")?;
            max_chars(&name, MAX_NAME_CHARS, NAME_TOO_LONG)?;
            changes.name = Some(name);
        }
        if let Some(offer) = self.offer {
            let offer = required_text(Some(offer), "Offer is required")?;
            max_chars(&offer, MAX_OFFER_CHARS, OFFER_TOO_LONG)?;
            changes.offer = Some(offer);
        }
        if let Some(description) = self.description {
            let description = description.trim().to_string();
            max_chars(&description, MAX_DESCRIPTION_CHARS, DESCRIPTION_TOO_LONG)?;
            changes.description = Some(description);
        }
        if let Some(price) = self.price {
            changes.price = Some(validate_price(price)?);
        }

        let image = match self.image {
            Some(raw) => Some(
                parse_image(&raw)?.ok_or_else(|| AppError::validation("Image URL is required"))?,
            ),
            None => None,
        };

        Ok((changes, image))
    }
}
