use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, Location, Violation};
use thiserror::Error;
use validator::ValidationErrors;

use crate::messages;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(messages::NOT_FOUND.to_string()),
            ProductError::Validation(violations) => AppError::Validation(violations),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<Violation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    Violation::new(Location::Body, field.to_string(), message)
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        ProductError::Validation(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use axum::http::StatusCode;
    use validator::Validate;

    #[test]
    fn test_validation_errors_become_body_violations() {
        let input = NewProduct {
            name: String::new(),
            price: -400.0,
            available: true,
        };

        let err: ProductError = input.validate().unwrap_err().into();
        let ProductError::Validation(violations) = err else {
            panic!("expected validation error");
        };

        assert_eq!(
            violations,
            vec![
                Violation::new(Location::Body, "name", messages::NAME_REQUIRED),
                Violation::new(Location::Body, "price", messages::INVALID_PRICE),
            ]
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::NotFound("9".into()), StatusCode::NOT_FOUND),
            (ProductError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (ProductError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
