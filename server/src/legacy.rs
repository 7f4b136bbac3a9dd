//! Minimal route set kept for compatibility with the first version of the
//! service. Nothing is stored: create validates the payload and echoes it.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::debug;

use crate::body::ItemPayload;
use crate::types::EchoedItem;

pub const RECEIVED_MESSAGE: &str = "Item received successfully!";

pub fn minimal_app() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/items/", get(read_items).post(echo_item))
        .route("/items", get(read_items).post(echo_item))
}

async fn hello() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

async fn read_items() -> Json<Value> {
    Json(json!({ "message": "hello" }))
}

async fn echo_item(ItemPayload(item): ItemPayload) -> Json<EchoedItem> {
    debug!(name = %item.name, "echoing item");
    Json(EchoedItem {
        message: RECEIVED_MESSAGE.to_string(),
        item,
    })
}
