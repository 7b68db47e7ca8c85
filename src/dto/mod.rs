//! Request schemas and the boundary validation that turns them into the
//! write shapes in [`crate::models`].

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    media::ImageRef,
};

pub mod categories;
pub mod deals;
pub mod products;

/// Accepts a JSON number or a numeric string; `null`, blank or missing is `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("price must be a number")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom("price must be a number")),
        Some(_) => Err(D::Error::custom("price must be a number")),
    }
}

/// Trimmed, non-empty text or a validation error with `message`.
pub(crate) fn required_text(value: Option<String>, message: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(message))
}

pub(crate) fn max_chars(value: &str, max: usize, message: &str) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(message));
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> AppResult<f64> {
    if !price.is_finite() {
        return Err(AppError::validation("Price must be a number"));
    }
    if price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    Ok(price)
}

pub(crate) fn parse_image(raw: &str) -> AppResult<Option<ImageRef>> {
    ImageRef::parse(raw).map_err(|err| AppError::validation(err.to_string()))
}

/// Trim ids, drop blanks and write well-formed UUIDs in canonical form.
/// Unknown ids are kept: category references are not enforced.
pub(crate) fn normalize_categories(ids: Vec<String>) -> Vec<String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .map(|id| match Uuid::try_parse(&id) {
            Ok(uuid) => uuid.hyphenated().to_string(),
            Err(_) => id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PriceOnly {
        #[serde(default, deserialize_with = "optional_number")]
        price: Option<f64>,
    }

    fn price_of(json: &str) -> Result<Option<f64>, serde_json::Error> {
        serde_json::from_str::<PriceOnly>(json).map(|p| p.price)
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(price_of(r#"{"price": 19.99}"#).unwrap(), Some(19.99));
        assert_eq!(price_of(r#"{"price": "5"}"#).unwrap(), Some(5.0));
        assert_eq!(price_of(r#"{"price": ""}"#).unwrap(), None);
        assert_eq!(price_of(r#"{}"#).unwrap(), None);
        assert!(price_of(r#"{"price": "cheap"}"#).is_err());
        assert!(price_of(r#"{"price": true}"#).is_err());
    }

    #[test]
    fn negative_and_non_finite_prices_are_rejected() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn categories_are_trimmed_and_canonicalised() {
        let ids = normalize_categories(vec![
            " 6F9619FF-8B86-D011-B42D-00C04FC964FF ".to_string(),
            "".to_string(),
            "legacy-id".to_string(),
        ]);
        assert_eq!(
            ids,
            vec![
                "6f9619ff-8b86-d011-b42d-00c04fc964ff".to_string(),
                "legacy-id".to_string()
            ]
        );
    }
}
