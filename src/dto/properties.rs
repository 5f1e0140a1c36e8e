use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Property,
};

/// Raw add-listing form. `price` arrives as text and must survive an explicit
/// parse before it becomes a typed value.
#[derive(Deserialize, Debug, ToSchema)]
pub struct NewPropertyForm {
    pub title: String,
    pub price: String,
    pub location: String,
}

/// Validated listing input.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub price: i64,
    pub location: String,
}

impl NewPropertyForm {
    pub fn validate(self) -> AppResult<NewProperty> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }

        let location = self.location.trim().to_string();
        if location.is_empty() {
            return Err(AppError::Validation("location must not be empty".into()));
        }

        let price = self
            .price
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("price must be a whole number".into()))?;
        if price < 0 {
            return Err(AppError::Validation("price must not be negative".into()));
        }

        Ok(NewProperty {
            title,
            price,
            location,
        })
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PropertyList {
    #[schema(value_type = Vec<Property>)]
    pub items: Vec<Property>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, price: &str, location: &str) -> NewPropertyForm {
        NewPropertyForm {
            title: title.into(),
            price: price.into(),
            location: location.into(),
        }
    }

    #[test]
    fn parses_valid_form() {
        let parsed = form("Loft", " 1000 ", "NYC").validate().unwrap();
        assert_eq!(parsed.title, "Loft");
        assert_eq!(parsed.price, 1000);
        assert_eq!(parsed.location, "NYC");
    }

    #[test]
    fn rejects_malformed_price() {
        assert!(matches!(
            form("Loft", "cheap", "NYC").validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("Loft", "10.5", "NYC").validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("Loft", "-1", "NYC").validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_blank_title_or_location() {
        assert!(form(" ", "1000", "NYC").validate().is_err());
        assert!(form("Loft", "1000", "").validate().is_err());
    }
}
