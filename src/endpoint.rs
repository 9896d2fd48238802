//! Leaf nodes: one method, one path, one handler.

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::method::Method;
use crate::node::Node;
use crate::path::Path;
use crate::request::Request;
use crate::response::Response;
use crate::routes::{Route, RoutesBuilder};

/// How an endpoint receives its request body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BodyStrategy {
    /// Buffer the body before the handler runs, up to the given number of
    /// bytes or the router's default limit when `None`. Larger bodies are
    /// answered with `413 Payload Too Large`.
    Collect(Option<usize>),
    /// Hand the body to the handler unread; see [`Request::take_body`].
    Stream,
}

impl Default for BodyStrategy {
    fn default() -> Self {
        Self::Collect(None)
    }
}

/// A single endpoint. Booting it makes exactly one registration.
pub struct Endpoint {
    method: Method,
    path: Path,
    body: BodyStrategy,
    handler: BoxedHandler,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<Path>, handler: impl Handler) -> Self {
        Self {
            method,
            path: path.into(),
            body: BodyStrategy::default(),
            handler: handler.into_boxed_handler(),
        }
    }

    /// Replaces the default body strategy (collect up to the router limit).
    pub fn body(mut self, strategy: BodyStrategy) -> Self {
        self.body = strategy;
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &Path { &self.path }
    pub fn body_strategy(&self) -> BodyStrategy { self.body }

    /// The handler the router will call: the user handler behind the body
    /// strategy.
    fn responder(&self) -> BoxedHandler {
        match self.body {
            BodyStrategy::Stream => Arc::clone(&self.handler),
            BodyStrategy::Collect(max) => Arc::new(Collecting {
                max,
                inner: Arc::clone(&self.handler),
            }),
        }
    }
}

impl Node for Endpoint {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        routes.register(Route::new(
            self.method,
            self.path.segments().to_vec(),
            self.responder(),
        ))
    }
}

/// Buffers the request body before delegating to the endpoint handler.
struct Collecting {
    max: Option<usize>,
    inner: BoxedHandler,
}

impl ErasedHandler for Collecting {
    fn call(&self, mut req: Request) -> BoxFuture {
        let limit = self.max.unwrap_or(req.body_limit());
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            match req.collect_body(limit).await {
                Ok(()) => inner.call(req).await,
                Err(Error::BodyTooLarge { limit }) => {
                    debug!(limit, path = %req.path(), "request body too large");
                    Response::status(StatusCode::PAYLOAD_TOO_LARGE)
                }
                Err(e) => {
                    debug!(error = %e, path = %req.path(), "request body unreadable");
                    Response::status(StatusCode::BAD_REQUEST)
                }
            }
        })
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// An endpoint for any [`Method`].
pub fn on(method: Method, path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(method, path, handler)
}

pub fn get(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Get, path, handler)
}

pub fn post(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Post, path, handler)
}

pub fn put(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Put, path, handler)
}

pub fn patch(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Patch, path, handler)
}

pub fn delete(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Delete, path, handler)
}

pub fn head(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Head, path, handler)
}

pub fn options(path: impl Into<Path>, handler: impl Handler) -> Endpoint {
    Endpoint::new(Method::Options, path, handler)
}
