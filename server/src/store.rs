//! In-memory item store.
//!
//! `ItemStore` is a cheap handle over shared state; clones see the same
//! items. Every router gets its store injected, so tests build isolated
//! instances instead of sharing a process-wide map.
//!
//! Keys are kept in a `BTreeMap`, which gives ascending-id iteration for both
//! listing and search. The next id is derived from the largest key while the
//! write lock is held, so concurrent creates never hand out the same id.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::params::Page;
use crate::types::{Item, ItemRecord, Listing};

#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    items: Arc<RwLock<BTreeMap<u64, Item>>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `items`, keyed by the given ids.
    pub fn with_items(items: impl IntoIterator<Item = (u64, Item)>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items.into_iter().collect())),
        }
    }

    /// The three-item dataset the service ships with for demos:
    /// apple (not on offer), banana (on offer), milk (unknown).
    pub fn demo() -> Self {
        Self::with_items([
            (1, item("apple", 1.25, Some(false))),
            (2, item("banana", 0.75, Some(true))),
            (3, item("milk", 3.49, None)),
        ])
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Returns one page of items in ascending id order. `count` is always
    /// the size of the whole store.
    pub async fn list(&self, page: Page) -> Listing {
        let items = self.items.read().await;
        Listing {
            count: items.len(),
            items: items
                .iter()
                .skip(page.skip)
                .take(page.limit)
                .map(|(id, item)| ItemRecord::new(*id, item))
                .collect(),
        }
    }

    pub async fn get(&self, id: u64) -> Option<ItemRecord> {
        self.items
            .read()
            .await
            .get(&id)
            .map(|item| ItemRecord::new(id, item))
    }

    /// Stores `item` under `max(ids) + 1` (or `1` when empty) and returns
    /// the assigned id along with the stored record.
    pub async fn create(&self, item: Item) -> (u64, Item) {
        let mut items = self.items.write().await;
        let id = items.last_key_value().map_or(1, |(last, _)| last + 1);
        items.insert(id, item.clone());
        (id, item)
    }

    /// Case-insensitive substring search over names. With `offer_only`,
    /// only items whose offer flag is exactly `true` are kept.
    pub async fn search(&self, query: &str, offer_only: bool) -> Listing {
        let needle = query.to_lowercase();
        let items = self.items.read().await;
        let matches: Vec<ItemRecord> = items
            .iter()
            .filter(|(_, item)| item.name.to_lowercase().contains(&needle))
            .filter(|(_, item)| !offer_only || item.is_offer == Some(true))
            .map(|(id, item)| ItemRecord::new(*id, item))
            .collect();
        Listing {
            count: matches.len(),
            items: matches,
        }
    }
}

fn item(name: &str, price: f64, is_offer: Option<bool>) -> Item {
    Item {
        name: name.to_string(),
        price,
        is_offer,
    }
}
