//! Item payload extraction for the create endpoints.
//!
//! The body is read as raw bytes and parsed as JSON whether or not a
//! `Content-Type` header was sent; only a header naming some other media type
//! is refused. Fields are then checked one by one so a request missing both
//! `name` and `price` gets an entry for each.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::error::{ApiError, FieldError};
use crate::params::parse_bool;
use crate::types::Item;

/// A validated `Item` taken from the request body.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemPayload(pub Item);

impl<S> FromRequest<S> for ItemPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(vec![FieldError::new(
                &["body"],
                rejection.body_text(),
                "body_error",
            )])
        })?;
        parse_item(&bytes).map(ItemPayload)
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };
    let is_json = value
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false);
    if is_json {
        Ok(())
    } else {
        Err(ApiError::Validation(vec![FieldError::new(
            &["body"],
            "Expected request with `Content-Type: application/json`",
            "content_type",
        )]))
    }
}

/// Parses and validates an item body, collecting one error per bad field.
pub fn parse_item(bytes: &[u8]) -> Result<Item, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Validation(vec![FieldError::missing(&["body"])]));
    }
    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        ApiError::Validation(vec![FieldError::new(
            &["body"],
            format!("JSON decode error: {err}"),
            "json_invalid",
        )])
    })?;
    let Value::Object(fields) = value else {
        return Err(ApiError::Validation(vec![FieldError::new(
            &["body"],
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )]));
    };

    let mut errors = Vec::new();
    let name = name_field(&fields, &mut errors);
    let price = price_field(&fields, &mut errors);
    let is_offer = offer_field(&fields, &mut errors);

    match (name, price) {
        (Some(name), Some(price)) if errors.is_empty() => Ok(Item {
            name,
            price,
            is_offer,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

fn name_field(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    match fields.get("name") {
        None => {
            errors.push(FieldError::missing(&["body", "name"]));
            None
        }
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            errors.push(FieldError::new(
                &["body", "name"],
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
    }
}

fn price_field(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    let loc = ["body", "price"];
    match fields.get("price") {
        None => {
            errors.push(FieldError::missing(&loc));
            None
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(raw)) => match raw.trim().parse::<f64>() {
            Ok(price) => Some(price),
            Err(_) => {
                errors.push(FieldError::new(
                    &loc,
                    "Input should be a valid number, unable to parse string as a number",
                    "float_parsing",
                ));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(&loc, "Input should be a valid number", "float_type"));
            None
        }
    }
}

fn offer_field(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<bool> {
    let parsed = match fields.get("is_offer") {
        None | Some(Value::Null) => return None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(Value::String(raw)) => parse_bool(raw),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(false),
            Some(v) if v == 1.0 => Some(true),
            _ => None,
        },
        Some(_) => None,
    };
    if parsed.is_none() {
        errors.push(FieldError::new(
            &["body", "is_offer"],
            "Input should be a valid boolean, unable to interpret input",
            "bool_parsing",
        ));
    }
    parsed
}
