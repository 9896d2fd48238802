//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! A route tree holds handlers of *different* types, and the router stores
//! them in one radix tree per method. Rust collections hold one concrete type,
//! so every handler is hidden behind a trait object (`dyn ErasedHandler`).
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ get("hello", hello)
//! hello.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(hello))                       ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```
//!
//! Synchronous closures go through [`sync`], which wraps them in [`SyncFn`]
//! and produces a ready future.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Dispatch interface shared by endpoint handlers and the body-collecting
/// wrapper routes install around them.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is satisfied by:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// handler::sync(|req: Request| -> impl IntoResponse { … })
/// ```
///
/// The trait is **sealed**: only the impls in this module satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Async functions ───────────────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Synchronous functions ─────────────────────────────────────────────────────

/// A synchronous handler. Build one with [`sync`].
pub struct SyncFn<F>(F);

/// Marks a plain closure as a handler. It runs on the request task, so keep it
/// free of blocking I/O.
///
/// ```rust
/// use arbor::{get, handler, Request};
///
/// let route = get("ping", handler::sync(|_req: Request| "pong"));
/// ```
pub fn sync<F, R>(f: F) -> SyncFn<F>
where
    F: Fn(Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    SyncFn(f)
}

impl<F> private::Sealed for SyncFn<F> {}

impl<F, R> Handler for SyncFn<F>
where
    F: Fn(Request) -> R + Send + Sync + 'static,
    R: IntoResponse + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(self)
    }
}

impl<F, R> ErasedHandler for SyncFn<F>
where
    F: Fn(Request) -> R + Send + Sync,
    R: IntoResponse,
{
    fn call(&self, req: Request) -> BoxFuture {
        let res = (self.0)(req).into_response();
        Box::pin(std::future::ready(res))
    }
}
