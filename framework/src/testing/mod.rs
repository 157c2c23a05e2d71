//! Testing utilities
//!
//! `TestClient` pushes requests through a `Router` in-process, without a
//! socket, and returns a `TestResponse` with assertion helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_kit::testing::TestClient;
//!
//! #[tokio::test]
//! async fn lists_users() {
//!     let client = TestClient::new(routes::router());
//!     let response = client.get("/users").await;
//!
//!     response.assert_status(200);
//!     assert_eq!(response.text(), "[]");
//! }
//! ```

use crate::http::HttpResponse;
use crate::routing::Router;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// In-process client bound to one router (and therefore one set of state)
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: router.into(),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send("GET", path, Bytes::new()).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send("DELETE", path, Bytes::new()).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> TestResponse {
        self.send("POST", path, to_json(body)).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> TestResponse {
        self.send("PUT", path, to_json(body)).await
    }

    /// Send a request with a raw body, e.g. deliberately malformed JSON
    pub async fn send(&self, method: &str, path: &str, body: impl Into<Bytes>) -> TestResponse {
        let request = hyper::Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap_or_else(|e| panic!("invalid test request {} {}: {}", method, path, e));

        TestResponse {
            inner: self.router.dispatch(request).await,
        }
    }
}

fn to_json<T: Serialize + ?Sized>(body: &T) -> Bytes {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .unwrap_or_else(|e| panic!("test body is not serializable: {}", e))
}

/// Response captured by `TestClient`
#[derive(Debug)]
pub struct TestResponse {
    inner: HttpResponse,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.inner.status_code()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.header_value(name)
    }

    pub fn bytes(&self) -> &Bytes {
        self.inner.body()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.inner.body()).into_owned()
    }

    /// Decode the body, panicking with the raw body on failure
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(self.inner.body()).unwrap_or_else(|e| {
            panic!(
                "\n  response body is not the expected JSON: {}\n  Received: {:?}\n",
                e,
                self.text()
            )
        })
    }

    /// Assert the status code, showing the body when it differs
    pub fn assert_status(&self, expected: u16) -> &Self {
        if self.status() != expected {
            panic!(
                "\n  response.assert_status({})\n\n  Expected: {}\n  Received: {}\n  Body: {:?}\n",
                expected,
                expected,
                self.status(),
                self.text()
            );
        }
        self
    }
}
