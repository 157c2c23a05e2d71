use crate::container::Container;
use crate::http::{HttpResponse, Request, Response};
use bytes::Bytes;
use matchit::Router as MatchitRouter;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock, RwLock};

/// Global registry mapping route names to path patterns
static ROUTE_REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

/// Register a route name -> path mapping
pub fn register_route_name(name: &str, path: &str) {
    let registry = ROUTE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut map) = registry.write() {
        map.insert(name.to_string(), path.to_string());
    }
}

/// Generate a URL for a named route with parameters
///
/// # Example
/// ```rust,ignore
/// let url = route("users.show", &[("id", "123")]);
/// assert_eq!(url, Some("/users/123".to_string()));
/// ```
pub fn route(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let path_pattern = registry.get(name)?;

    let mut url = path_pattern.clone();
    for (key, value) in params {
        url = url.replace(&format!("{{{}}}", key), value);
    }
    Some(url)
}

/// Type alias for route handlers
pub type BoxedHandler =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

const METHODS: [(hyper::Method, &str); 4] = [
    (hyper::Method::GET, "GET"),
    (hyper::Method::POST, "POST"),
    (hyper::Method::PUT, "PUT"),
    (hyper::Method::DELETE, "DELETE"),
];

/// HTTP Router: one matchit table per method plus the shared state handed to handlers
pub struct Router {
    get_routes: MatchitRouter<Arc<BoxedHandler>>,
    post_routes: MatchitRouter<Arc<BoxedHandler>>,
    put_routes: MatchitRouter<Arc<BoxedHandler>>,
    delete_routes: MatchitRouter<Arc<BoxedHandler>>,
    state: Arc<Container>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
            put_routes: MatchitRouter::new(),
            delete_routes: MatchitRouter::new(),
            state: Arc::new(Container::new()),
        }
    }

    /// Register shared state, resolvable in handlers via `Request::state::<T>()`
    pub fn with_state<T: Any + Send + Sync + 'static>(mut self, value: T) -> Self {
        Arc::make_mut(&mut self.state).singleton(value);
        self
    }

    fn table(&self, method: &hyper::Method) -> Option<&MatchitRouter<Arc<BoxedHandler>>> {
        match *method {
            hyper::Method::GET => Some(&self.get_routes),
            hyper::Method::POST => Some(&self.post_routes),
            hyper::Method::PUT => Some(&self.put_routes),
            hyper::Method::DELETE => Some(&self.delete_routes),
            _ => None,
        }
    }

    fn insert<H, Fut>(mut self, method: hyper::Method, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        let table = match method {
            hyper::Method::GET => &mut self.get_routes,
            hyper::Method::POST => &mut self.post_routes,
            hyper::Method::PUT => &mut self.put_routes,
            _ => &mut self.delete_routes,
        };
        if let Err(err) = table.insert(path, Arc::new(handler)) {
            tracing::warn!("route {} {} not registered: {}", method, path, err);
        }
        RouteBuilder {
            router: self,
            last_path: path.to_string(),
        }
    }

    /// Register a GET route
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::GET, path, handler)
    }

    /// Register a POST route
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::POST, path, handler)
    }

    /// Register a PUT route
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::PUT, path, handler)
    }

    /// Register a DELETE route
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert(hyper::Method::DELETE, path, handler)
    }

    /// Match a request and return the handler with extracted params
    pub fn match_route(
        &self,
        method: &hyper::Method,
        path: &str,
    ) -> Option<(Arc<BoxedHandler>, HashMap<String, String>)> {
        let router = self.table(method)?;

        router.at(path).ok().map(|matched| {
            let params: HashMap<String, String> = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (matched.value.clone(), params)
        })
    }

    /// Methods that have a route matching `path`
    pub fn allowed_methods(&self, path: &str) -> Vec<&'static str> {
        METHODS
            .iter()
            .filter(|(method, _)| {
                self.table(method)
                    .map(|table| table.at(path).is_ok())
                    .unwrap_or(false)
            })
            .map(|(_, name)| *name)
            .collect()
    }

    /// Route a buffered request to its handler and produce the response
    ///
    /// Unknown paths answer 404; known paths with an unregistered method answer
    /// 405 with an `Allow` header.
    pub async fn dispatch(&self, req: hyper::Request<Bytes>) -> HttpResponse {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        match self.match_route(&method, &path) {
            Some((handler, params)) => {
                let request = Request::new(req)
                    .with_params(params)
                    .with_state(self.state.clone());

                // Both Ok and Err carry an HttpResponse
                handler(request).await.unwrap_or_else(|e| e)
            }
            None => {
                let allowed = self.allowed_methods(&path);
                if allowed.is_empty() {
                    HttpResponse::text("404 page not found").status(404)
                } else {
                    HttpResponse::text("Method Not Allowed")
                        .status(405)
                        .header("Allow", allowed.join(", "))
                }
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned after registering a route, enabling .name() chaining
pub struct RouteBuilder {
    pub(crate) router: Router,
    last_path: String,
}

impl RouteBuilder {
    /// Name the most recently registered route
    pub fn name(self, name: &str) -> Router {
        register_route_name(name, &self.last_path);
        self.router
    }

    /// Register a GET route (for chaining without .name())
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    /// Register a POST route (for chaining without .name())
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }

    /// Register a PUT route (for chaining without .name())
    pub fn put<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.put(path, handler)
    }

    /// Register a DELETE route (for chaining without .name())
    pub fn delete<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.delete(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}
