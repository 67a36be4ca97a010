use axum::body::Body;
use axum::Router;
use http::header::{HeaderMap, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;

const VALIDATION_FAILED: &str = "Validation failed";

/// Test client wrapping an assembled `axum::Router`.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(empty(Method::GET, path)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(empty(Method::DELETE, path)).await
    }

    /// POST `body` serialized as JSON.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> TestResponse {
        self.send(with_json(Method::POST, path, body)).await
    }

    /// PUT `body` serialized as JSON.
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> TestResponse {
        self.send(with_json(Method::PUT, path, body)).await
    }

    /// POST an arbitrary body with the given content type.
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes()
            .to_vec();

        TestResponse { status, headers, body }
    }
}

fn empty(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("valid request")
}

fn with_json<B: Serialize + ?Sized>(method: Method, path: &str, body: &B) -> Request<Body> {
    let bytes = serde_json::to_vec(body).expect("serializable body");
    Request::builder()
        .method(method)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .expect("valid request")
}

/// A buffered response with chained assertions.
///
/// Locations inside the JSON body are RFC 6901 pointers: `/name`,
/// `/details/0/field`, `/3/id`.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected {expected}, got {}\nBody: {}",
            self.status,
            self.text()
        );
        self
    }

    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_created(self) -> Self {
        self.assert_status(StatusCode::CREATED)
    }

    /// 204 with an empty body.
    pub fn assert_no_content(self) -> Self {
        let resp = self.assert_status(StatusCode::NO_CONTENT);
        assert!(resp.body.is_empty(), "Expected empty body, got: {}", resp.text());
        resp
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// `{"error": message}`, whatever the status.
    pub fn assert_error(self, message: &str) -> Self {
        self.assert_at("/error", message)
    }

    /// A 422 validation failure naming `field` in its details.
    pub fn assert_field_error(self, field: &str) -> Self {
        let resp = self
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
            .assert_error(VALIDATION_FAILED);
        let fields = resp.field_errors();
        assert!(
            fields.iter().any(|f| f == field),
            "Expected a validation error on \"{field}\", got {fields:?}"
        );
        resp
    }

    /// Field names listed in a 422 body, in order.
    pub fn field_errors(&self) -> Vec<String> {
        match self.at("/details") {
            Value::Array(details) => details
                .iter()
                .filter_map(|d| d.get("field").and_then(Value::as_str))
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Value at a JSON pointer, `Null` when absent.
    pub fn at(&self, pointer: &str) -> Value {
        self.json::<Value>()
            .pointer(pointer)
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn assert_at(self, pointer: &str, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let actual = self.at(pointer);
        assert_eq!(
            actual,
            expected,
            "At \"{pointer}\"\n  Expected: {expected}\n  Actual:   {actual}\n  Body: {}",
            self.text()
        );
        self
    }

    /// The array at `pointer` (`""` for the whole body) has `len` items.
    pub fn assert_len(self, pointer: &str, len: usize) -> Self {
        let actual = match self.at(pointer) {
            Value::Array(items) => items.len(),
            other => panic!("Expected an array at \"{pointer}\", got {other}"),
        };
        assert_eq!(actual, len, "Length at \"{pointer}\"\nBody: {}", self.text());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserialize the whole body.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("Failed to parse JSON: {e}\nBody: {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
