//! Middleware tests.

mod helpers;

use helpers::*;
use uuid::Uuid;

// === Request ID ===

#[tokio::test]
async fn response_includes_request_id() {
    client().get("/health").await.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn request_id_is_uuid_v4() {
    let response = client().get("/health").await;

    let id = response.header("x-request-id").unwrap();
    let parsed = Uuid::parse_str(id).unwrap_or_else(|_| panic!("Invalid UUID: {id}"));
    assert_eq!(parsed.get_version_num(), 4);
}

#[tokio::test]
async fn propagates_incoming_request_id() {
    let custom_id = "my-custom-request-id-12345";

    let response = client()
        .get_with_headers("/health", &[("x-request-id", custom_id)])
        .await;

    response.assert_header("x-request-id", custom_id);
}

#[tokio::test]
async fn generates_different_ids_for_each_request() {
    let client = client();
    let first = client.get("/health").await;
    let second = client.get("/health").await;

    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}

#[tokio::test]
async fn error_responses_carry_request_id() {
    let response = client().post_secret("/api/map/mapHome", "nobody").await;
    response.assert_header_exists("x-request-id");
}

// === CORS ===

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = client()
        .get_with_headers("/health", &[("origin", "https://example.com")])
        .await;

    response.assert_header("access-control-allow-origin", "*");
}
