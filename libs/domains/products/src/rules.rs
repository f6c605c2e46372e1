//! Per-route rule sets.
//!
//! Rules run in declaration order and every failing rule is reported, so a
//! single field can produce more than one violation.

use axum_helpers::validation::coerce;
use axum_helpers::{Rule, RuleSet};
use serde_json::Value;

use crate::messages;
use crate::schema::{AVAILABLE, ID, NAME, PRICE};

/// `GET`, `PATCH` and `DELETE /{id}`
pub struct ProductIdRules;

/// `POST /`
pub struct CreateProductRules;

/// `PUT /{id}`
pub struct UpdateProductRules;

fn is_positive_price(value: &Value) -> bool {
    coerce::as_number(value).is_some_and(|price| price > 0.0)
}

const ID_RULE: Rule = Rule::typed(&ID, messages::INVALID_ID);

const BODY_RULES: [Rule; 4] = [
    Rule::required(&NAME, messages::NAME_REQUIRED),
    Rule::typed(&PRICE, messages::INVALID_PRICE),
    Rule::required(&PRICE, messages::PRICE_REQUIRED),
    Rule::custom(&PRICE, is_positive_price, messages::INVALID_PRICE),
];

static ID_RULES: [Rule; 1] = [ID_RULE];

const AVAILABLE_RULE: Rule = Rule::typed(&AVAILABLE, messages::INVALID_AVAILABILITY);

static CREATE_RULES: [Rule; 5] = [
    BODY_RULES[0],
    BODY_RULES[1],
    BODY_RULES[2],
    BODY_RULES[3],
    AVAILABLE_RULE,
];

static UPDATE_RULES: [Rule; 6] = [
    ID_RULE,
    BODY_RULES[0],
    BODY_RULES[1],
    BODY_RULES[2],
    BODY_RULES[3],
    Rule::typed(&AVAILABLE.mandatory(), messages::INVALID_AVAILABILITY),
];

impl RuleSet for ProductIdRules {
    fn rules() -> &'static [Rule] {
        &ID_RULES
    }
}

impl RuleSet for CreateProductRules {
    fn rules() -> &'static [Rule] {
        &CREATE_RULES
    }
}

impl RuleSet for UpdateProductRules {
    fn rules() -> &'static [Rule] {
        &UPDATE_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::{run_rules, RequestInput, Violation};
    use serde_json::json;
    use std::collections::HashMap;

    fn input(id: Option<&str>, body: Value) -> RequestInput {
        let params = id
            .map(|id| HashMap::from([("id".to_string(), id.to_string())]))
            .unwrap_or_default();
        let body = match body {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        RequestInput::new(params, body)
    }

    fn messages_for<R: RuleSet>(input: &RequestInput) -> Vec<String> {
        run_rules(R::rules(), input)
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|Violation { message, .. }| message)
            .collect()
    }

    #[test]
    fn test_empty_create_reports_every_body_rule() {
        let errors = messages_for::<CreateProductRules>(&input(None, json!({})));
        assert_eq!(
            errors,
            vec![
                messages::NAME_REQUIRED,
                messages::INVALID_PRICE,
                messages::PRICE_REQUIRED,
                messages::INVALID_PRICE,
            ]
        );
    }

    #[test]
    fn test_create_checks_availability_only_when_sent() {
        let valid = input(None, json!({ "name": "Mouse", "price": 50 }));
        assert!(messages_for::<CreateProductRules>(&valid).is_empty());

        let invalid = input(None, json!({ "name": "Mouse", "price": 50, "available": "maybe" }));
        assert_eq!(
            messages_for::<CreateProductRules>(&invalid),
            vec![messages::INVALID_AVAILABILITY]
        );
    }

    #[test]
    fn test_empty_update_also_checks_availability() {
        let errors = messages_for::<UpdateProductRules>(&input(Some("1"), json!({})));
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.last().map(String::as_str), Some(messages::INVALID_AVAILABILITY));
    }

    #[test]
    fn test_non_positive_price_fails_once() {
        for price in [json!(0), json!(-400), json!("-1.5")] {
            let errors = messages_for::<CreateProductRules>(&input(
                None,
                json!({ "name": "Mouse", "price": price }),
            ));
            assert_eq!(errors, vec![messages::INVALID_PRICE], "price {price}");
        }
    }

    #[test]
    fn test_non_numeric_price_fails_type_and_positivity() {
        let errors = messages_for::<CreateProductRules>(&input(
            None,
            json!({ "name": "Mouse", "price": "abc" }),
        ));
        assert_eq!(errors, vec![messages::INVALID_PRICE, messages::INVALID_PRICE]);
    }

    #[test]
    fn test_id_must_be_an_integer() {
        for id in ["abc", "1.5", "", "01"] {
            let errors = messages_for::<ProductIdRules>(&input(Some(id), json!({})));
            assert_eq!(errors, vec![messages::INVALID_ID], "id {id:?}");
        }
        assert!(messages_for::<ProductIdRules>(&input(Some("12"), json!({}))).is_empty());
    }

    #[test]
    fn test_update_accepts_loose_booleans() {
        for available in [json!(false), json!("true"), json!(1), json!("0")] {
            let errors = messages_for::<UpdateProductRules>(&input(
                Some("3"),
                json!({ "name": "Mouse", "price": 10, "available": available }),
            ));
            assert!(errors.is_empty(), "available {available}");
        }
    }
}
