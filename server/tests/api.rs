use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use item_server::{
    app, minimal_app, router, CreatedItem, EchoedItem, ItemRecord, ItemStore, Listing, Mode,
    ServerConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn raw_request(uri: &str, content_type: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(http::header::CONTENT_TYPE, content_type);
    }
    builder.body(body.to_string()).unwrap()
}

fn seeded() -> Router {
    app(ItemStore::demo())
}

/// Asserts a 422 whose first error points at `loc`.
async fn assert_rejected(response: axum::response::Response, loc: Value) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(response).await;
    assert_eq!(body["detail"][0]["loc"], loc, "body: {body}");
}

// --- list ---

#[tokio::test]
async fn list_items_empty() {
    let resp = app(ItemStore::new()).oneshot(get("/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 0);
    assert!(listing.items.is_empty());
}

#[tokio::test]
async fn list_items_in_id_order() {
    let resp = seeded().oneshot(get("/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "count": 3,
            "items": [
                {"id": 1, "name": "apple", "price": 1.25, "is_offer": false},
                {"id": 2, "name": "banana", "price": 0.75, "is_offer": true},
                {"id": 3, "name": "milk", "price": 3.49, "is_offer": null},
            ]
        })
    );
}

#[tokio::test]
async fn list_items_window_keeps_total_count() {
    let resp = seeded().oneshot(get("/items?skip=1&limit=1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 3);
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].id, 2);
}

#[tokio::test]
async fn list_items_trailing_slash() {
    let resp = seeded().oneshot(get("/items/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 3);
}

#[tokio::test]
async fn list_items_rejects_limit_out_of_range() {
    let resp = seeded().oneshot(get("/items?limit=0")).await.unwrap();
    assert_rejected(resp, json!(["query", "limit"])).await;

    let resp = seeded().oneshot(get("/items?limit=201")).await.unwrap();
    assert_rejected(resp, json!(["query", "limit"])).await;
}

#[tokio::test]
async fn list_items_rejects_negative_skip() {
    let resp = seeded().oneshot(get("/items?skip=-1")).await.unwrap();
    assert_rejected(resp, json!(["query", "skip"])).await;
}

#[tokio::test]
async fn list_items_rejects_non_integer_limit() {
    let resp = seeded().oneshot(get("/items?limit=lots")).await.unwrap();
    assert_rejected(resp, json!(["query", "limit"])).await;
}

#[tokio::test]
async fn list_items_repeated_key_keeps_last_value() {
    let resp = seeded().oneshot(get("/items?limit=1&limit=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 3);
    assert_eq!(listing.items.len(), 2);
}

#[tokio::test]
async fn list_items_huge_skip_returns_empty_page() {
    for skip in ["18446744073709551615", "99999999999999999999"] {
        let resp = seeded()
            .oneshot(get(&format!("/items?skip={skip}")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "skip={skip}");
        let listing: Listing = body_json(resp).await;
        assert_eq!(listing.count, 3);
        assert!(listing.items.is_empty());
    }
}

// --- get ---

#[tokio::test]
async fn get_item_found() {
    let resp = seeded().oneshot(get("/items/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: ItemRecord = body_json(resp).await;
    assert_eq!(item.name, "banana");
    assert_eq!(item.is_offer, Some(true));
}

#[tokio::test]
async fn get_item_not_found() {
    let resp = seeded().oneshot(get("/items/5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn get_item_bad_id_returns_422() {
    let resp = seeded().oneshot(get("/items/abc")).await.unwrap();
    assert_rejected(resp, json!(["path", "item_id"])).await;
}

#[tokio::test]
async fn get_item_twice_is_byte_identical() {
    let app = seeded();
    let first = body_bytes(app.clone().oneshot(get("/items/3")).await.unwrap()).await;
    let second = body_bytes(app.oneshot(get("/items/3")).await.unwrap()).await;
    assert_eq!(first, second);
}

// --- create ---

#[tokio::test]
async fn create_item_returns_201_with_next_id() {
    let resp = seeded()
        .oneshot(json_request("POST", "/items", r#"{"name":"kiwi","price":2.0}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "message": "Item stored",
            "id": 4,
            "item": {"name": "kiwi", "price": 2.0, "is_offer": null}
        })
    );
}

#[tokio::test]
async fn create_item_on_empty_store_gets_id_1() {
    let resp = app(ItemStore::new())
        .oneshot(json_request("POST", "/items/", r#"{"name":"Apple","price":1.99,"is_offer":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CreatedItem = body_json(resp).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.item.is_offer, Some(true));
}

#[tokio::test]
async fn create_item_keeps_non_positive_price() {
    let resp = seeded()
        .oneshot(json_request("POST", "/items", r#"{"name":"refund","price":-1.5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CreatedItem = body_json(resp).await;
    assert_eq!(created.item.price, -1.5);
}

#[tokio::test]
async fn create_item_missing_price_returns_422() {
    let store = ItemStore::demo();
    let resp = app(store.clone())
        .oneshot(json_request("POST", "/items", r#"{"name":"kiwi"}"#))
        .await
        .unwrap();

    assert_rejected(resp, json!(["body", "price"])).await;
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn create_item_empty_object_reports_every_missing_field() {
    let resp = seeded()
        .oneshot(json_request("POST", "/items", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "detail": [
                {"loc": ["body", "name"], "msg": "Field required", "type": "missing"},
                {"loc": ["body", "price"], "msg": "Field required", "type": "missing"},
            ]
        })
    );
}

#[tokio::test]
async fn create_item_without_content_type_returns_201() {
    let resp = seeded()
        .oneshot(raw_request("/items", None, r#"{"name":"kiwi","price":2.0}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CreatedItem = body_json(resp).await;
    assert_eq!(created.id, 4);
    assert_eq!(created.item.name, "kiwi");
}

#[tokio::test]
async fn create_item_rejects_non_json_content_type() {
    let store = ItemStore::demo();
    let resp = app(store.clone())
        .oneshot(raw_request("/items", Some("text/plain"), r#"{"name":"kiwi","price":2.0}"#))
        .await
        .unwrap();

    assert_rejected(resp, json!(["body"])).await;
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn create_item_wrong_type_returns_422() {
    let resp = seeded()
        .oneshot(json_request("POST", "/items", r#"{"name":"kiwi","price":"cheap"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"][0]["loc"], json!(["body", "price"]));
    assert_eq!(body["detail"][0]["type"], "float_parsing");
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = seeded()
        .oneshot(json_request("POST", "/items", r#"{"name":"#))
        .await
        .unwrap();

    assert_rejected(resp, json!(["body"])).await;
}

// --- search ---

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
    let resp = seeded().oneshot(get("/search?q=AN")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 1);
    assert_eq!(listing.items[0].name, "banana");
}

#[tokio::test]
async fn search_milk_scenario() {
    let resp = seeded().oneshot(get("/search?q=milk")).await.unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"count": 1, "items": [{"id": 3, "name": "milk", "price": 3.49, "is_offer": null}]})
    );
}

#[tokio::test]
async fn search_offer_only_drops_false_and_null() {
    let resp = seeded().oneshot(get("/search?q=a&offer_only=true")).await.unwrap();

    let listing: Listing = body_json(resp).await;
    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["banana"]);
}

#[tokio::test]
async fn search_empty_q_returns_422() {
    let resp = seeded().oneshot(get("/search?q=")).await.unwrap();
    assert_rejected(resp, json!(["query", "q"])).await;
}

#[tokio::test]
async fn search_missing_q_returns_422() {
    let resp = seeded().oneshot(get("/search")).await.unwrap();
    assert_rejected(resp, json!(["query", "q"])).await;
}

// --- home ---

#[tokio::test]
async fn home_page_shows_count() {
    let resp = seeded().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    assert!(html.contains("<strong>3</strong>"));
}

// --- minimal configuration ---

#[tokio::test]
async fn minimal_root_says_hello() {
    let resp = minimal_app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"Hello": "World"}));
}

#[tokio::test]
async fn minimal_items_listing_is_static() {
    let resp = minimal_app().oneshot(get("/items/")).await.unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"message": "hello"}));
}

#[tokio::test]
async fn minimal_create_echoes_with_200() {
    let resp = minimal_app()
        .oneshot(json_request("POST", "/items/", r#"{"name":"Notebook","price":4.5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: EchoedItem = body_json(resp).await;
    assert_eq!(echoed.message, "Item received successfully!");
    assert_eq!(echoed.item.name, "Notebook");
    assert_eq!(echoed.item.is_offer, None);
}

#[tokio::test]
async fn minimal_create_still_validates() {
    let resp = minimal_app()
        .oneshot(json_request("POST", "/items/", r#"{"price":4.5}"#))
        .await
        .unwrap();

    assert_rejected(resp, json!(["body", "name"])).await;
}

#[tokio::test]
async fn minimal_create_without_content_type_echoes() {
    let resp = minimal_app()
        .oneshot(raw_request("/items/", None, r#"{"name":"Notebook","price":4.5}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: EchoedItem = body_json(resp).await;
    assert_eq!(echoed.item.name, "Notebook");
}

#[tokio::test]
async fn minimal_has_no_lookup() {
    let resp = minimal_app().oneshot(get("/items/5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- create then read back ---

#[tokio::test]
async fn create_then_get_lifecycle() {
    use tower::Service;

    let mut app = app(ItemStore::demo()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/items", r#"{"name":"kiwi","price":2.0}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CreatedItem = body_json(resp).await;
    assert_eq!(created.id, 4);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/items/4"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: ItemRecord = body_json(resp).await;
    assert_eq!(fetched, ItemRecord::new(4, &created.item));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/items?limit=200"))
        .await
        .unwrap();
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 4);
    let ids: Vec<u64> = listing.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, [1, 2, 3, 4]);
}

// --- configuration ---

#[tokio::test]
async fn router_defaults_to_empty_full_api() {
    let resp = router(&ServerConfig::default()).oneshot(get("/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing = body_json(resp).await;
    assert_eq!(listing.count, 0);
}

#[tokio::test]
async fn router_seeds_demo_items() {
    let config = ServerConfig {
        seed: true,
        ..ServerConfig::default()
    };
    let resp = router(&config).oneshot(get("/items/3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: ItemRecord = body_json(resp).await;
    assert_eq!(item.name, "milk");
}

#[tokio::test]
async fn router_minimal_mode() {
    let config = ServerConfig {
        mode: Mode::Minimal,
        ..ServerConfig::default()
    };
    let resp = router(&config).oneshot(get("/")).await.unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"Hello": "World"}));
}
