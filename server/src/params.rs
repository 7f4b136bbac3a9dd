//! Query parameter validation for the list and search endpoints.
//!
//! Raw query values are captured as strings and converted here so that each
//! bad parameter is reported individually with its own location, instead of
//! failing the whole query string on the first error. A repeated key keeps its
//! last value.

use crate::error::{ApiError, FieldError};

pub const DEFAULT_SKIP: usize = 0;
pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

#[derive(Debug, Default)]
pub struct ListQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

impl FromIterator<(String, String)> for ListQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "skip" => query.skip = Some(value),
                "limit" => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[derive(Debug, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub offer_only: Option<String>,
}

impl FromIterator<(String, String)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => query.q = Some(value),
                "offer_only" => query.offer_only = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Offset/limit window over the store, already range-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<ListQuery> for Page {
    type Error = ApiError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let skip = int_param(query.skip.as_deref(), "skip", 0, None, &mut errors);
        let limit = int_param(
            query.limit.as_deref(),
            "limit",
            1,
            Some(MAX_LIMIT as i128),
            &mut errors,
        );
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        // Clamped: such a skip lies past the end of any store.
        Ok(Self {
            skip: skip.map_or(DEFAULT_SKIP, |v| usize::try_from(v).unwrap_or(usize::MAX)),
            limit: limit.map_or(DEFAULT_LIMIT, |v| v as usize),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub offer_only: bool,
}

impl TryFrom<SearchQuery> for SearchParams {
    type Error = ApiError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let q = match query.q {
            None => {
                errors.push(FieldError::missing(&["query", "q"]));
                String::new()
            }
            Some(q) if q.is_empty() => {
                errors.push(FieldError::new(
                    &["query", "q"],
                    "String should have at least 1 character",
                    "string_too_short",
                ));
                q
            }
            Some(q) => q,
        };

        let offer_only = match query.offer_only.as_deref() {
            None => false,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                errors.push(FieldError::new(
                    &["query", "offer_only"],
                    "Input should be a valid boolean, unable to interpret input",
                    "bool_parsing",
                ));
                false
            }),
        };

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(Self { q, offer_only })
    }
}

/// Parses an optional integer parameter and checks it against `min..=max`.
/// Returns `None` when absent or invalid; invalid values are pushed to
/// `errors`.
fn int_param(
    raw: Option<&str>,
    name: &str,
    min: i128,
    max: Option<i128>,
    errors: &mut Vec<FieldError>,
) -> Option<i128> {
    let raw = raw?;
    let loc = ["query", name];
    match raw.trim().parse::<i128>() {
        Err(_) => {
            errors.push(FieldError::new(
                &loc,
                "Input should be a valid integer, unable to parse string as an integer",
                "int_parsing",
            ));
            None
        }
        Ok(value) if value < min => {
            errors.push(FieldError::new(
                &loc,
                format!("Input should be greater than or equal to {min}"),
                "greater_than_equal",
            ));
            None
        }
        Ok(value) => match max {
            Some(max) if value > max => {
                errors.push(FieldError::new(
                    &loc,
                    format!("Input should be less than or equal to {max}"),
                    "less_than_equal",
                ));
                None
            }
            _ => Some(value),
        },
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}
