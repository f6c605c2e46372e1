//! Field schema of a product request.
//!
//! | field       | kind    | where  | required | default |
//! |-------------|---------|--------|----------|---------|
//! | `id`        | Integer | path   | yes      |         |
//! | `name`      | Text    | body   | yes      |         |
//! | `price`     | Number  | body   | yes      |         |
//! | `available` | Boolean | body   | no       | `true`  |
//!
//! Rule sets, request decoding and creation defaults all read from here.
//! A full update replaces every field, so it demands `available` through
//! [`FieldSchema::mandatory`].

use axum_helpers::{FieldDefault, FieldKind, FieldSchema, RequestInput};

use crate::error::{ProductError, ProductResult};

pub const ID: FieldSchema = FieldSchema::param("id", FieldKind::Integer);
pub const NAME: FieldSchema = FieldSchema::body("name", FieldKind::Text);
pub const PRICE: FieldSchema = FieldSchema::body("price", FieldKind::Number);
pub const AVAILABLE: FieldSchema =
    FieldSchema::optional("available", FieldKind::Boolean, FieldDefault::Bool(true));

/// Read the product id from the path.
///
/// Ids that pass validation but do not fit the id column cannot exist, so
/// they are reported as not found.
pub fn product_id(input: &RequestInput) -> ProductResult<i32> {
    let raw = input.param(ID.name).unwrap_or_default();
    raw.parse()
        .map_err(|_| ProductError::NotFound(raw.to_string()))
}
