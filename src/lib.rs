//! # arbor
//!
//! Declarative route trees for a minimal hyper-based HTTP framework.
//!
//! A server's routes are written as one nested value instead of a list of
//! imperative registration calls. The value mirrors the URL structure: groups
//! contribute path prefixes and middleware to everything inside them, and
//! ordinary Rust control flow decides which branches exist at all.
//!
//! ```rust,no_run
//! use arbor::builder::when;
//! use arbor::{get, health, middleware, post, routes, Group, Node, Request, Response, Server};
//! use http::StatusCode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arbor::Error> {
//!     let admin = std::env::var("ADMIN").is_ok();
//!
//!     let app = routes![
//!         health::routes(),
//!         Group::path("users", routes![
//!             get("", list_users),
//!             get(":id", show_user),
//!             post("", create_user),
//!         ]),
//!         when(admin, || Group::path("admin", get("stats", stats))),
//!     ]
//!     .middleware([middleware::boxed(middleware::Trace)]);
//!
//!     Server::bind("0.0.0.0:3000")?.run(app).await
//! }
//!
//! async fn list_users(_req: Request) -> Response {
//!     Response::json(b"[]".to_vec())
//! }
//!
//! async fn show_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(b"{}".to_vec())
//! }
//!
//! async fn stats(_req: Request) -> &'static str { "{}" }
//! ```
//!
//! ## Booting
//!
//! Booting walks a tree depth first, left to right, and makes exactly one
//! registration per endpoint against a [`RoutesBuilder`]. Paths concatenate
//! outer to inner; middleware chains run outermost scope first. The first
//! registration error stops the walk and is returned unchanged.

mod conditional;
mod config;
mod endpoint;
mod erased;
mod error;
mod group;
mod method;
mod modifier;
mod node;
mod path;
mod request;
mod response;
mod router;
mod routes;
mod sequence;
mod server;

pub mod builder;
pub mod handler;
pub mod health;
pub mod middleware;

pub use conditional::Conditional;
pub use config::{Config, DEFAULT_MAX_BODY_SIZE};
pub use endpoint::{BodyStrategy, Endpoint, delete, get, head, on, options, patch, post, put};
pub use erased::AnyNode;
pub use error::{BoxError, Error};
pub use group::{Group, MiddlewareScope, PathScope};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use middleware::{BoxedMiddleware, Middleware, Next};
pub use modifier::{Content, MiddlewareModifier, Modifier, PathModifier};
pub use node::{Node, boot};
pub use path::{Path, PathSegment};
pub use request::{Body, Request};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::{RouteInfo, Router};
pub use routes::{Grouped, Route, RoutesBuilder};
pub use sequence::Spread;
pub use server::Server;
