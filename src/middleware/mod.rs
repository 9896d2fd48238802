//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: structured tracing, request-id injection, and
//! authentication-header inspection.
//!
//! Middleware is attached to a route tree with
//! [`Group::middleware`](crate::Group::middleware) or the
//! [`Node::middleware`](crate::Node::middleware) modifier. Each registered
//! route stores its chain outermost scope first, and a request walks the chain
//! in that order before it reaches the endpoint handler:
//!
//! ```text
//! Group::middleware([auth], (
//!     get("a", a),                              ← auth → a
//!     Group::middleware([audit, limit], (
//!         get("b", b),                          ← auth → audit → limit → b
//!     )),
//! ))
//! ```
//!
//! Any `async fn(Request, Next) -> impl IntoResponse` is middleware.

mod trace;

pub use trace::Trace;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;
use crate::response::IntoResponse;

/// Request interceptor. Call [`Next::run`] to continue down the chain, or
/// return a response directly to short-circuit it.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;

    /// Name used in registration logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A type-erased middleware shared by every route registered under its scope.
pub type BoxedMiddleware = Arc<dyn Middleware>;

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let fut = self(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Erases a middleware value. Lists of mixed middleware types are written as
/// `[boxed(a), boxed(b)]`.
pub fn boxed(middleware: impl Middleware) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// The remainder of a route's middleware chain, ending in its handler.
pub struct Next {
    chain: Arc<[BoxedMiddleware]>,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(chain: Arc<[BoxedMiddleware]>, endpoint: BoxedHandler) -> Self {
        Self { chain, index: 0, endpoint }
    }

    /// Passes the request to the next middleware, or to the handler once the
    /// chain is exhausted.
    pub fn run(self, req: Request) -> BoxFuture {
        let Some(middleware) = self.chain.get(self.index).cloned() else {
            return self.endpoint.call(req);
        };
        let next = Self { index: self.index + 1, ..self };
        middleware.handle(req, next)
    }
}
