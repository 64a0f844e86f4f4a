//! # Product Endpoint Tests
//!
//! Exercises product CRUD through the access gate: credential checks come
//! first regardless of payload, validation failures aggregate every bad field,
//! and partial updates leave unspecified fields untouched.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::web::test_infrastructure::*;

#[tokio::test]
async fn test_create_product_anonymous_returns_401() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::anonymous(&server);

    let response = client
        .post("/store/products/", &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_anonymous_401_even_with_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::anonymous(&server);

    // Credentials are checked before the body is touched.
    let response = client
        .post_raw("/store/products/", "{not json")
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_non_admin_returns_403() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::member(&server);

    let response = client
        .post("/store/products/", &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_incomplete_payload_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::admin(&server);

    let response = client
        .post("/store/products/", &json!({"title": "a"}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_empty_payload_aggregates_all_field_errors() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::admin(&server);

    let response = client
        .post("/store/products/", &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    for field in ["title", "unit_price", "inventory", "collection"] {
        assert!(
            body[field].is_array(),
            "expected errors for field {field}, got {body}"
        );
    }
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_negative_price_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;

    let response = admin
        .post(
            "/store/products/",
            &json!({
                "title": "a",
                "description": "aa",
                "slug": "-",
                "inventory": 10,
                "unit_price": -1.0,
                "collection": collection_id
            }),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["unit_price"].is_array());
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_unknown_collection_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);

    let response = admin
        .post(
            "/store/products/",
            &json!({
                "title": "a",
                "description": "aa",
                "slug": "-",
                "inventory": 10,
                "unit_price": 5.5,
                "collection": 999
            }),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["collection"].is_array());
    server.shutdown().await;
}

#[tokio::test]
async fn test_create_product_valid_returns_201() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;

    let response = admin
        .post(
            "/store/products/",
            &json!({
                "title": "a",
                "description": "aa",
                "slug": "-",
                "inventory": 10,
                "unit_price": 5.5,
                "collection": collection_id
            }),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["title"], "a");
    assert_eq!(body["unit_price"], json!(5.5));
    assert_eq!(body["collection"], collection_id);
    server.shutdown().await;
}

#[tokio::test]
async fn test_retrieve_product_returns_200_without_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let anonymous = WebTestClient::anonymous(&server);
    let response = anonymous
        .get(&format!("/store/products/{product_id}/"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body, product);
    server.shutdown().await;
}

#[tokio::test]
async fn test_retrieve_missing_product_returns_404() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::anonymous(&server);

    let response = client
        .get("/store/products/999/")
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.shutdown().await;
}

#[tokio::test]
async fn test_list_products_is_public() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    seed_product(&admin, collection_id).await;
    seed_product(&admin, collection_id).await;

    let anonymous = WebTestClient::anonymous(&server);
    let response = anonymous
        .get("/store/products/")
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body.as_array().expect("expected a list").len(), 2);
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_product_anonymous_returns_401() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let anonymous = WebTestClient::anonymous(&server);
    let response = anonymous
        .put(&format!("/store/products/{product_id}/"), &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_product_non_admin_returns_403() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let member = WebTestClient::member(&server);
    let response = member
        .put(&format!("/store/products/{product_id}/"), &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_product_negative_price_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let response = admin
        .put(
            &format!("/store/products/{product_id}/"),
            &json!({
                "title": "aaaa",
                "description": "aa",
                "slug": "-",
                "inventory": 10,
                "unit_price": -5.0,
                "collection": collection_id
            }),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["unit_price"].is_array());
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_missing_product_returns_404_before_validation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);

    let response = admin
        .put("/store/products/999/", &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_product_valid_returns_200() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let response = admin
        .put(
            &format!("/store/products/{product_id}/"),
            &json!({
                "title": "aaaa",
                "description": "aa",
                "slug": "-",
                "inventory": 10,
                "unit_price": 6.0,
                "collection": collection_id
            }),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["id"], product_id);
    assert_eq!(body["title"], "aaaa");
    assert_eq!(body["unit_price"], json!(6.0));
    server.shutdown().await;
}

#[tokio::test]
async fn test_replace_product_is_idempotent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();
    let path = format!("/store/products/{product_id}/");
    let payload = json!({
        "title": "replaced",
        "description": "aa",
        "slug": "-",
        "inventory": 3,
        "unit_price": 9.5,
        "collection": collection_id
    });

    let first = admin.put(&path, &payload).await.expect("Request failed");
    let first_body: Value = first.json().await.expect("Failed to parse body");

    let second = admin.put(&path, &payload).await.expect("Request failed");
    assert_eq!(second.status(), StatusCode::OK);
    let second_body: Value = second.json().await.expect("Failed to parse body");

    assert_eq!(first_body, second_body);
    server.shutdown().await;
}

#[tokio::test]
async fn test_patch_product_negative_price_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let response = admin
        .patch(
            &format!("/store/products/{product_id}/"),
            &json!({"unit_price": -5.0}),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["unit_price"].is_array());
    server.shutdown().await;
}

#[tokio::test]
async fn test_patch_product_price_leaves_other_fields_unchanged() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let response = admin
        .patch(
            &format!("/store/products/{product_id}/"),
            &json!({"unit_price": 5.0}),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(body["unit_price"], json!(5.0));
    assert_eq!(body["title"], product["title"]);
    assert_eq!(body["inventory"], product["inventory"]);
    assert_eq!(body["collection"], product["collection"]);
    server.shutdown().await;
}

#[tokio::test]
async fn test_patch_product_unknown_collection_returns_400() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let response = admin
        .patch(
            &format!("/store/products/{product_id}/"),
            &json!({"collection": 999}),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse body");
    assert!(body["collection"].is_array());

    // The failed patch must not have touched the product.
    let current = admin
        .get(&format!("/store/products/{product_id}/"))
        .await
        .expect("Request failed");
    let current_body: Value = current.json().await.expect("Failed to parse body");
    assert_eq!(current_body["collection"], collection_id);
    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_product_anonymous_returns_401() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let anonymous = WebTestClient::anonymous(&server);
    let response = anonymous
        .delete(&format!("/store/products/{product_id}/"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_product_non_admin_returns_403() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();

    let member = WebTestClient::member(&server);
    let response = member
        .delete(&format!("/store/products/{product_id}/"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_product_returns_204_then_404() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);
    let collection_id = seed_collection(&admin).await;
    let product = seed_product(&admin, collection_id).await;
    let product_id = product["id"].as_i64().unwrap();
    let path = format!("/store/products/{product_id}/");

    let response = admin.delete(&path).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = admin.get(&path).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let server = TestServer::start().await.expect("Failed to start server");
    let admin = WebTestClient::admin(&server);

    let response = admin
        .delete("/store/products/999/")
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_api_key_returns_401() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = WebTestClient::with_key(&server, Some("no-such-key"));

    let response = client
        .post("/store/products/", &json!({}))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    server.shutdown().await;
}
