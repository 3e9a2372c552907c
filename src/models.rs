use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents a watch in the catalog
///
/// Catalog entries are publicly readable; all mutation is admin-gated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Watch {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Submariner Date")]
    pub name: String,
    #[schema(example = "Rolex")]
    pub brand: String,
    #[schema(example = "Iconic diving watch, water-resistant to 300 meters.")]
    pub description: String,
    /// Price in USD, strictly positive
    #[schema(example = 14300.0)]
    pub price: f64,
    #[schema(example = "https://images.example.com/submariner.jpg")]
    pub image_url: String,
    /// Available quantity, never negative
    #[schema(example = 3)]
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new watch (admin only)
///
/// All fields are required except stock, which defaults to 0.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWatch {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Speedmaster Professional Moonwatch")]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Omega")]
    pub brand: String,
    #[validate(length(min = 10))]
    #[schema(example = "The first watch worn on the moon, flight-qualified by NASA.")]
    pub description: String,
    /// Price in USD, must be greater than 0
    #[validate(custom = "crate::validation::validate_positive_price")]
    #[schema(example = 6395.0)]
    pub price: f64,
    #[validate(length(min = 1))]
    #[schema(example = "https://images.example.com/speedmaster.jpg")]
    pub image_url: String,
    /// Stock must be 0 or greater
    #[validate(range(min = 0))]
    #[serde(default)]
    #[schema(example = 5)]
    pub stock: i32,
}

/// Payload for updating an existing watch (admin only)
///
/// All fields are optional: only the fields present in the request are
/// validated and applied, everything else keeps its stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateWatch {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Updated name")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Updated brand")]
    pub brand: Option<String>,
    #[validate(length(min = 10))]
    #[schema(example = "An updated, still informative description.")]
    pub description: Option<String>,
    #[validate(custom = "crate::validation::validate_positive_price")]
    #[schema(example = 7500.0)]
    pub price: Option<f64>,
    #[validate(length(min = 1))]
    #[schema(example = "https://images.example.com/updated.jpg")]
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    #[schema(example = 5)]
    pub stock: Option<i32>,
}

impl UpdateWatch {
    /// Merge the supplied fields onto an existing row
    ///
    /// Fields absent from the payload keep their stored value; id and
    /// created_at are never touched by an update.
    pub fn apply_to(self, existing: Watch) -> Watch {
        Watch {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            brand: self.brand.unwrap_or(existing.brand),
            description: self.description.unwrap_or(existing.description),
            price: self.price.unwrap_or(existing.price),
            image_url: self.image_url.unwrap_or(existing.image_url),
            stock: self.stock.unwrap_or(existing.stock),
            created_at: existing.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_create() -> CreateWatch {
        CreateWatch {
            name: "Submariner Date".to_string(),
            brand: "Rolex".to_string(),
            description: "Iconic diving watch, water-resistant to 300 meters.".to_string(),
            price: 14300.0,
            image_url: "https://images.example.com/submariner.jpg".to_string(),
            stock: 3,
        }
    }

    #[test]
    fn test_create_watch_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_watch_zero_price_fails() {
        let mut watch = valid_create();
        watch.price = 0.0;
        assert!(watch.validate().is_err());
    }

    #[test]
    fn test_create_watch_one_cent_price_succeeds() {
        let mut watch = valid_create();
        watch.price = 0.01;
        assert!(watch.validate().is_ok());
    }

    #[test]
    fn test_create_watch_negative_stock_fails() {
        let mut watch = valid_create();
        watch.stock = -1;
        assert!(watch.validate().is_err());
    }

    #[test]
    fn test_create_watch_short_description_fails() {
        let mut watch = valid_create();
        watch.description = "too short".to_string();
        // 9 characters, minimum is 10
        assert!(watch.validate().is_err());
    }

    #[test]
    fn test_create_watch_stock_defaults_to_zero() {
        let json = r#"{
            "name": "Nautilus 5711",
            "brand": "Patek Philippe",
            "description": "An icon of luxury sports watches.",
            "price": 52635.0,
            "image_url": "https://images.example.com/nautilus.jpg"
        }"#;

        let watch: CreateWatch = serde_json::from_str(json).expect("deserialize CreateWatch");
        assert_eq!(watch.stock, 0);
    }

    #[test]
    fn test_update_watch_partial_fields() {
        let json = r#"{"stock": 5}"#;

        let update: UpdateWatch = serde_json::from_str(json).expect("deserialize UpdateWatch");
        assert_eq!(update.stock, Some(5));
        assert_eq!(update.name, None);
        assert_eq!(update.brand, None);
        assert_eq!(update.description, None);
        assert_eq!(update.price, None);
        assert_eq!(update.image_url, None);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_watch_empty_payload_is_valid() {
        let update: UpdateWatch = serde_json::from_str("{}").expect("deserialize UpdateWatch");
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_watch_invalid_supplied_field_fails() {
        let json = r#"{"price": 0.0}"#;

        let update: UpdateWatch = serde_json::from_str(json).expect("deserialize UpdateWatch");
        assert!(update.validate().is_err());
    }

    fn existing_watch() -> Watch {
        Watch {
            id: 7,
            name: "Submariner Date".to_string(),
            brand: "Rolex".to_string(),
            description: "Iconic diving watch, water-resistant to 300 meters.".to_string(),
            price: 14300.0,
            image_url: "https://images.example.com/submariner.jpg".to_string(),
            stock: 3,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_apply_single_field_keeps_the_rest_unchanged() {
        let existing = existing_watch();
        let update: UpdateWatch = serde_json::from_str(r#"{"stock": 5}"#).unwrap();

        let merged = update.apply_to(existing.clone());
        assert_eq!(merged.stock, 5);
        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.brand, existing.brand);
        assert_eq!(merged.description, existing.description);
        assert_eq!(merged.price, existing.price);
        assert_eq!(merged.image_url, existing.image_url);
        assert_eq!(merged.created_at, existing.created_at);
    }

    #[test]
    fn test_apply_supplied_fields_overwrite_stored_values() {
        let existing = existing_watch();
        let update = UpdateWatch {
            name: Some("Submariner No-Date".to_string()),
            brand: None,
            description: None,
            price: Some(9100.0),
            image_url: None,
            stock: None,
        };

        let merged = update.apply_to(existing.clone());
        assert_eq!(merged.name, "Submariner No-Date");
        assert_eq!(merged.price, 9100.0);
        assert_eq!(merged.brand, existing.brand);
        assert_eq!(merged.stock, existing.stock);
    }
}
