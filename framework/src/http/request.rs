use super::body::parse_json;
use crate::container::Container;
use crate::error::FrameworkError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP Request wrapper with a fully buffered body
pub struct Request {
    inner: hyper::Request<Bytes>,
    params: HashMap<String, String>,
    state: Arc<Container>,
}

impl Request {
    pub fn new(inner: hyper::Request<Bytes>) -> Self {
        Self {
            inner,
            params: HashMap::new(),
            state: Arc::new(Container::new()),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_state(mut self, state: Arc<Container>) -> Self {
        self.state = state;
        self
    }

    /// Get a route parameter by name (e.g., /users/{id})
    /// Returns Err(FrameworkError::ParamError) if the parameter is missing
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Parse the request body as JSON
    ///
    /// The Content-Type header is not checked; any body that parses is accepted.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct CreateUser { name: String, email: String }
    ///
    /// pub async fn store(req: Request) -> Response {
    ///     let data: CreateUser = req.json()?;
    ///     // ...
    /// }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(self.inner.body())
    }

    /// Resolve shared state registered on the router
    pub fn state<T: Any + Send + Sync + 'static>(&self) -> Result<Arc<T>, FrameworkError> {
        self.state
            .get::<T>()
            .ok_or_else(FrameworkError::service_not_found::<T>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn request(body: &'static str) -> Request {
        let inner = hyper::Request::builder()
            .method("POST")
            .uri("/users/7")
            .header("content-type", "application/json")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap();
        Request::new(inner)
    }

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_param_lookup() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "7".to_string());
        let req = request("").with_params(params);

        assert_eq!(req.param("id").unwrap(), "7");
        assert_eq!(req.param("slug").unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_json_body() {
        let req = request(r#"{"name":"A"}"#);
        let named: Named = req.json().unwrap();
        assert_eq!(named.name, "A");
    }

    #[test]
    fn test_json_ignores_content_type() {
        let inner = hyper::Request::builder()
            .header("content-type", "text/plain")
            .body(Bytes::from_static(br#"{"name":"B"}"#))
            .unwrap();
        let named: Named = Request::new(inner).json().unwrap();
        assert_eq!(named.name, "B");
    }

    #[test]
    fn test_missing_state_is_500() {
        let req = request("");
        let err = req.state::<String>().unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_state_resolves() {
        let mut container = Container::new();
        container.singleton(42u32);
        let req = request("").with_state(Arc::new(container));
        assert_eq!(*req.state::<u32>().unwrap(), 42);
    }
}
