use axum_helpers::validation::coerce;
use axum_helpers::{FieldSchema, RequestInput, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::messages;
use crate::schema::{AVAILABLE, NAME, PRICE};

/// A catalog product
///
/// Timestamps are kept for bookkeeping and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(example = 300.0)]
    pub price: f64,
    pub available: bool,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite every editable field.
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.price = changes.price;
        self.available = changes.available;
    }

    pub fn toggle_availability(&mut self) {
        self.available = !self.available;
    }
}

/// Input for creating a product
#[derive(Debug, Clone, PartialEq, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "El nombre del producto es obligatorio"))]
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Precio no válido"))]
    #[schema(example = 399.0)]
    pub price: f64,

    #[schema(default = true)]
    pub available: bool,
}

impl NewProduct {
    /// Decode a request body that already passed the create rules.
    pub fn from_input(input: &RequestInput) -> ProductResult<Self> {
        Ok(Self {
            name: read_name(input)?,
            price: read_price(input)?,
            available: read_available(input, true)?,
        })
    }
}

/// Input for a full update; all three fields are replaced
#[derive(Debug, Clone, PartialEq, Validate, ToSchema)]
pub struct ProductChanges {
    #[validate(length(min = 1, message = "El nombre del producto es obligatorio"))]
    #[schema(example = "Monitor Curvo - Actualizado")]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Precio no válido"))]
    #[schema(example = 300.0)]
    pub price: f64,

    pub available: bool,
}

impl ProductChanges {
    /// Decode a request body that already passed the update rules.
    pub fn from_input(input: &RequestInput) -> ProductResult<Self> {
        Ok(Self {
            name: read_name(input)?,
            price: read_price(input)?,
            available: read_available(input, false)?,
        })
    }
}

fn invalid(schema: &FieldSchema, message: &str) -> ProductError {
    ProductError::Validation(vec![Violation::new(schema.location, schema.name, message)])
}

fn read_name(input: &RequestInput) -> ProductResult<String> {
    input
        .field(NAME.name)
        .and_then(coerce::as_text)
        .ok_or_else(|| invalid(&NAME, messages::NAME_REQUIRED))
}

fn read_price(input: &RequestInput) -> ProductResult<f64> {
    input
        .field(PRICE.name)
        .and_then(coerce::as_number)
        .filter(|price| price.is_finite())
        .ok_or_else(|| invalid(&PRICE, messages::INVALID_PRICE))
}

fn read_available(input: &RequestInput, use_default: bool) -> ProductResult<bool> {
    let value = if use_default {
        input.field_or_default(&AVAILABLE)
    } else {
        input.field(AVAILABLE.name).cloned()
    };

    value
        .as_ref()
        .and_then(coerce::as_bool)
        .ok_or_else(|| invalid(&AVAILABLE, messages::INVALID_AVAILABILITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn body(value: Value) -> RequestInput {
        let Value::Object(map) = value else {
            return RequestInput::default();
        };
        RequestInput::new(Default::default(), map)
    }

    #[test]
    fn test_new_product_defaults_to_available() {
        let input = NewProduct::from_input(&body(json!({ "name": "Mouse", "price": 50 }))).unwrap();
        assert_eq!(
            input,
            NewProduct {
                name: "Mouse".to_string(),
                price: 50.0,
                available: true,
            }
        );
    }

    #[test]
    fn test_new_product_reads_loose_values() {
        let input = NewProduct::from_input(&body(json!({
            "name": "Teclado",
            "price": "19.90",
            "available": "false"
        })))
        .unwrap();

        assert_eq!(input.price, 19.9);
        assert!(!input.available);
    }

    #[test]
    fn test_new_product_rejects_bad_availability() {
        let err = NewProduct::from_input(&body(json!({
            "name": "Teclado",
            "price": 20,
            "available": "maybe"
        })))
        .unwrap_err();

        let ProductError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].message, messages::INVALID_AVAILABILITY);
    }

    #[test]
    fn test_changes_require_availability() {
        let err = ProductChanges::from_input(&body(json!({ "name": "Mouse", "price": 5 })));
        assert!(matches!(err, Err(ProductError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let input = NewProduct {
            name: "Mouse".to_string(),
            price: 0.0,
            available: true,
        };
        assert!(input.validate().is_err());

        let input = NewProduct {
            price: 0.01,
            ..input
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_serialized_product_has_no_timestamps() {
        let product = Product {
            id: 1,
            name: "Mouse".to_string(),
            price: 50.0,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "id": 1, "name": "Mouse", "price": 50.0, "available": true })
        );
    }

    #[test]
    fn test_apply_changes_and_toggle() {
        let mut product = Product {
            id: 3,
            name: "Old".to_string(),
            price: 1.0,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        product.apply_changes(ProductChanges {
            name: "New".to_string(),
            price: 2.5,
            available: false,
        });
        assert_eq!((product.name.as_str(), product.price, product.available), ("New", 2.5, false));

        product.toggle_availability();
        assert!(product.available);
    }
}
