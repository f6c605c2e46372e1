//! Validation gate: runs a route's rules before the handler sees the request.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::errors::AppError;
use crate::validation::{RequestInput, RuleSet, run_rules};

/// Extractor that evaluates the rule set `R` against the path parameters and
/// JSON body, rejecting with `400 { "errors": [...] }` when any rule fails.
///
/// The body is only read when the request declares a JSON content type;
/// any other body, and an empty one, is treated as `{}`. A JSON body that
/// does not parse is rejected with `400 { "error": ... }` before any rule runs.
///
/// # Example
/// ```ignore
/// struct ItemIdRules;
///
/// impl RuleSet for ItemIdRules {
///     fn rules() -> &'static [Rule] { &ITEM_ID_RULES }
/// }
///
/// async fn get_item(Validated(input, _): Validated<ItemIdRules>) -> String {
///     format!("item {}", input.param("id").unwrap_or_default())
/// }
/// ```
pub struct Validated<R>(pub RequestInput, pub PhantomData<R>);

impl<R, S> FromRequest<S> for Validated<R>
where
    R: RuleSet + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without captures have no parameters to check
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let body = if is_json(&parts.headers) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            parse_body(&bytes).map_err(IntoResponse::into_response)?
        } else {
            Map::new()
        };

        let input = RequestInput::new(params, body);
        run_rules(R::rules(), &input).map_err(|errors| AppError::Validation(errors).into_response())?;

        Ok(Validated(input, PhantomData))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(media_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let media_type = media_type.trim().to_ascii_lowercase();
    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(AppError::BadRequest(format!("Invalid JSON body: {}", e))),
    }
}
