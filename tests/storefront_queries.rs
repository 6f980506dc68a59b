//! Storefront read paths against the HTTP stub: featured listings,
//! category browsing with enabled gating, the canonical car-detail
//! read, and cache sharing across concurrent consumers.

mod common;

use std::sync::Arc;

use common::{Route, StubServer};
use forecourt::client::view_models::Storefront;
use forecourt::{ApiClient, CatalogApi, QueryCache, QueryKey, SessionStore};
use serde_json::json;

fn car_json(id: &str, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Car {id}"),
        "description": "clean",
        "price": 2_000_000,
        "image_url": "https://cdn.test/main.jpg",
        "car_gallery": "[\"https://cdn.test/g1.jpg\"]",
        "category": category,
        "brand_name": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "fuel_type": "hybrid",
        "color": "white",
        "seat": 5,
        "type_of_gear": "cvt"
    })
}

async fn wire(server: &StubServer) -> (Arc<QueryCache>, Storefront) {
    let session = Arc::new(SessionStore::new("forecourt_session"));
    let client = ApiClient::new(server.base_url(), session).unwrap();
    let cache = Arc::new(QueryCache::new());
    let storefront = Storefront::new(Arc::clone(&cache), CatalogApi::new(client));
    (cache, storefront)
}

#[tokio::test]
async fn featured_cars_come_from_the_carlisting_endpoint() {
    let server = StubServer::start(vec![Route::get(
        "/carlisting",
        json!({ "cars": [car_json("1", "Sedan")] }).to_string(),
    )])
    .await;
    let (_cache, storefront) = wire(&server).await;

    let featured = storefront.featured().await;
    let cars = featured.data.unwrap();
    assert_eq!(cars.len(), 1);
    // Gallery arrived as an encoded string and was normalized.
    assert_eq!(cars[0].car_gallery, vec!["https://cdn.test/g1.jpg"]);
}

#[tokio::test]
async fn empty_category_slug_issues_no_request() {
    let server = StubServer::start(vec![Route::get(
        "/cars",
        json!({ "cars": [] }).to_string(),
    )])
    .await;
    let (_cache, storefront) = wire(&server).await;

    let result = storefront.cars_by_category("").await;
    assert!(result.data.is_none());
    assert!(!result.has_error());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn empty_car_id_issues_no_request() {
    let server = StubServer::start(vec![]).await;
    let (_cache, storefront) = wire(&server).await;

    let result = storefront.car_detail("  ").await;
    assert!(result.data.is_none());
    assert!(!result.has_error());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn category_browse_passes_the_slug_as_query() {
    let server = StubServer::start(vec![Route::get(
        "/cars",
        json!({ "cars": [car_json("1", "SUV")] }).to_string(),
    )])
    .await;
    let (_cache, storefront) = wire(&server).await;

    let result = storefront.cars_by_category("SUV").await;
    assert_eq!(result.data.unwrap().len(), 1);

    let recorded = server.requests();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].target.contains("cat=SUV"));
}

#[tokio::test]
async fn car_detail_uses_the_single_resource_endpoint() {
    let server = StubServer::start(vec![Route::get(
        "/car",
        json!({ "car": car_json("42", "Sedan") }).to_string(),
    )])
    .await;
    let (_cache, storefront) = wire(&server).await;

    let result = storefront.car_detail("42").await;
    assert_eq!(result.data.unwrap().id, "42");

    let recorded = server.requests();
    assert_eq!(recorded[0].path(), "/car");
    assert!(recorded[0].target.contains("id=42"));
}

#[tokio::test]
async fn concurrent_consumers_share_one_fetch() {
    let server = StubServer::start(vec![Route::get(
        "/carlisting",
        json!({ "cars": [car_json("1", "Sedan")] }).to_string(),
    )])
    .await;
    let (_cache, storefront) = wire(&server).await;

    let (a, b) = tokio::join!(storefront.featured(), storefront.featured());
    assert!(a.data.is_some());
    assert!(b.data.is_some());
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn failed_read_retries_after_manual_invalidation() {
    let server = StubServer::start(vec![]).await; // every route 404s
    let (cache, storefront) = wire(&server).await;

    let result = storefront.featured().await;
    assert!(result.has_error());
    assert!(result.data.is_none());

    // Without invalidation the error is served from the cache.
    storefront.featured().await;
    assert_eq!(server.request_count(), 1);

    // The retry affordance re-invalidates and re-fetches.
    cache.invalidate(&QueryKey::Featured);
    let retried = storefront.featured().await;
    assert!(retried.has_error());
    assert_eq!(server.request_count(), 2);
}
