//! Test client helpers.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Drives a router in-process through `oneshot`.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), &[]).await
    }

    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), headers).await
    }

    /// POST without a body.
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, Body::empty(), &[]).await
    }

    /// POST with a raw body sent as JSON.
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Body::from(body.to_string()),
            &[(header::CONTENT_TYPE.as_str(), "application/json")],
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.post_raw(uri, &body.to_string()).await
    }

    /// POST `{ "secret": secret }`.
    pub async fn post_secret(&self, uri: &str, secret: &str) -> TestResponse {
        self.post_json(uri, serde_json::json!({ "secret": secret })).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Body::empty(), &[]).await
    }

    async fn send(&self, method: Method, uri: &str, body: Body, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().uri(uri).method(method);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("Request failed");

        TestResponse::from_response(response).await
    }
}

/// Buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Body is not valid UTF-8")
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(
            self.headers.contains_key(name),
            "Expected header '{}' to exist",
            name
        );
        self
    }

    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        let value = self
            .header(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));

        assert_eq!(value, expected, "Header '{}'", name);
        self
    }

    /// Asserts the `{error, message}` error body.
    pub fn assert_error(&self, expected: StatusCode) -> &Self {
        self.assert_status(expected);
        let json = self.json();
        assert!(json["error"].is_string(), "missing 'error': {json}");
        assert!(json["message"].is_string(), "missing 'message': {json}");
        self
    }
}
