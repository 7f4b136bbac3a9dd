//! Handlers for the full item API.

use askama::Template;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use tracing::debug;

use crate::body::ItemPayload;
use crate::error::ApiError;
use crate::page::HomePage;
use crate::params::{ListQuery, Page, SearchParams, SearchQuery};
use crate::store::ItemStore;
use crate::types::{CreatedItem, ItemRecord, Listing};

pub const STORED_MESSAGE: &str = "Item stored";

pub async fn home(State(store): State<ItemStore>) -> Result<Html<String>, ApiError> {
    let page = HomePage {
        count: store.len().await,
    };
    Ok(Html(page.render()?))
}

pub async fn list_items(
    State(store): State<ItemStore>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Listing>, ApiError> {
    let Query(pairs) = query?;
    let query: ListQuery = pairs.into_iter().collect();
    let page = Page::try_from(query)?;
    let listing = store.list(page).await;
    debug!(skip = page.skip, limit = page.limit, returned = listing.items.len(), "listed items");
    Ok(Json(listing))
}

pub async fn get_item(
    State(store): State<ItemStore>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ItemRecord>, ApiError> {
    let Path(id) = id?;
    store.get(id).await.map(Json).ok_or_else(|| {
        debug!(id, "item not found");
        ApiError::NotFound
    })
}

pub async fn create_item(
    State(store): State<ItemStore>,
    ItemPayload(input): ItemPayload,
) -> Result<(StatusCode, Json<CreatedItem>), ApiError> {
    let (id, item) = store.create(input).await;
    debug!(id, name = %item.name, "item stored");
    Ok((
        StatusCode::CREATED,
        Json(CreatedItem {
            message: STORED_MESSAGE.to_string(),
            id,
            item,
        }),
    ))
}

pub async fn search_items(
    State(store): State<ItemStore>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Listing>, ApiError> {
    let Query(pairs) = query?;
    let query: SearchQuery = pairs.into_iter().collect();
    let params = SearchParams::try_from(query)?;
    let listing = store.search(&params.q, params.offer_only).await;
    debug!(q = %params.q, offer_only = params.offer_only, count = listing.count, "searched items");
    Ok(Json(listing))
}
