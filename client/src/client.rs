//! Stateless HTTP request builder and response parser for the item API.
//!
//! # Design
//! `ItemClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatedItem, ItemRecord, Listing, NewItem};

/// Synchronous, stateless client for the item API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_root(&self) -> HttpRequest {
        self.get(format!("{}/", self.base_url))
    }

    /// Lists items. Omitted parameters are left to the server defaults.
    pub fn build_list_items(&self, skip: Option<usize>, limit: Option<usize>) -> HttpRequest {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(skip) = skip {
            query.append_pair("skip", &skip.to_string());
        }
        if let Some(limit) = limit {
            query.append_pair("limit", &limit.to_string());
        }
        self.get(with_query(format!("{}/items", self.base_url), query.finish()))
    }

    pub fn build_get_item(&self, id: u64) -> HttpRequest {
        self.get(format!("{}/items/{id}", self.base_url))
    }

    pub fn build_create_item(&self, input: &NewItem) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/items", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_search_items(&self, q: &str, offer_only: bool) -> HttpRequest {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("q", q);
        if offer_only {
            query.append_pair("offer_only", "true");
        }
        self.get(with_query(format!("{}/search", self.base_url), query.finish()))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Listing, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<ItemRecord, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<CreatedItem, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_search_items(&self, response: HttpResponse) -> Result<Listing, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Accepts any 2xx response and returns its body as untyped JSON. An
    /// empty body yields `Value::Null`. Every other status, 404 included,
    /// becomes `ApiError::Http` so the body stays available for reporting.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(&response.body)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }
}

fn with_query(path: String, query: String) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
