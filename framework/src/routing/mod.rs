mod router;

pub use router::{register_route_name, route, BoxedHandler, RouteBuilder, Router};
