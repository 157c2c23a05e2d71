//! crud-kit: a small hyper + matchit HTTP layer for in-memory CRUD services
//!
//! ```rust,ignore
//! use crud_kit::{Router, Server, ServerConfig};
//!
//! let router = Router::new()
//!     .with_state(UserStore::new())
//!     .get("/users", controllers::user::index)
//!     .post("/users", controllers::user::store);
//!
//! Server::with_config(router, ServerConfig::from_env()).run().await?;
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
pub mod testing;

pub use config::{env, AppConfig, Config, Environment, ServerConfig};
pub use container::Container;
pub use error::{AppError, FrameworkError};
pub use http::{HttpResponse, Request, Response};
pub use routing::{route, RouteBuilder, Router};
pub use server::{Server, ServerError};
