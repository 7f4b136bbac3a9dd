//! Domain DTOs for the item API.
//!
//! # Design
//! These mirror the server's wire schema but are defined independently, so the
//! client never links against Axum. Integration tests run both crates
//! together and catch schema drift.

use serde::{Deserialize, Serialize};

/// Payload for creating an item. `is_offer` is always sent, as `null` when
/// unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub is_offer: Option<bool>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64, is_offer: Option<bool>) -> Self {
        Self {
            name: name.into(),
            price,
            is_offer,
        }
    }
}

/// A stored item as returned by the list, get and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub is_offer: Option<bool>,
}

/// A page of items, or a set of search matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub count: usize,
    pub items: Vec<ItemRecord>,
}

/// Response to a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub message: String,
    pub id: u64,
    pub item: NewItem,
}
