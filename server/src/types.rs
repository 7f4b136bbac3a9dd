//! Wire types for the item service.
//!
//! `Item` is the stored record and doubles as the create payload. Responses
//! that expose an item together with its key use `ItemRecord`, which flattens
//! the id next to the item fields.

use serde::{Deserialize, Serialize};

/// An item as stored, and as accepted by `POST /items`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
    /// `None` means "unknown" and is kept distinct from `Some(false)`.
    #[serde(default)]
    pub is_offer: Option<bool>,
}

/// An item together with the id the store assigned to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub is_offer: Option<bool>,
}

impl ItemRecord {
    pub fn new(id: u64, item: &Item) -> Self {
        Self {
            id,
            name: item.name.clone(),
            price: item.price,
            is_offer: item.is_offer,
        }
    }
}

/// Body of the list and search endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// For list this is the size of the whole store, not of the page.
    pub count: usize,
    pub items: Vec<ItemRecord>,
}

/// Body returned by `POST /items`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub message: String,
    pub id: u64,
    pub item: Item,
}

/// Body returned by the minimal configuration's echo create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EchoedItem {
    pub message: String,
    pub item: Item,
}
