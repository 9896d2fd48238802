//! The [`Node`] capability and the boot entry point.
//!
//! A route tree is an ordinary Rust value assembled from nodes: endpoints,
//! tuples and collections of nodes, optional and either/or nodes, scopes,
//! erased nodes and modified nodes. Booting walks it once, depth first and
//! left to right, and turns every endpoint into exactly one registration
//! against a [`RoutesBuilder`].
//!
//! ```text
//! (                                            boot order
//!     get("A", a),                             1. GET /A
//!     Group::path("B", (
//!         get("C", c),                         2. GET /B/C
//!         Group::path("D", get("", d)),        3. GET /B/D
//!     )),
//! )
//! ```
//!
//! Booting never mutates the tree. Scope nodes hand their descendants a
//! scoped view of the target; everything else passes the target through
//! unchanged.

use tracing::{debug, debug_span, error};

use crate::erased::AnyNode;
use crate::error::Error;
use crate::group::{MiddlewareScope, PathScope};
use crate::middleware::BoxedMiddleware;
use crate::modifier::{Content, MiddlewareModifier, Modifier, PathModifier};
use crate::path::Path;
use crate::routes::RoutesBuilder;

/// Anything that can register routes.
///
/// Implement it on your own types to package a subtree as a reusable unit:
///
/// ```rust
/// use arbor::{get, Error, Group, Node, Request, RoutesBuilder};
///
/// struct Users;
///
/// impl Node for Users {
///     fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
///         Group::path("users", (
///             get("", list),
///             get(":id", show),
///         ))
///         .boot(routes)
///     }
/// }
///
/// async fn list(_req: Request) -> &'static str { "[]" }
/// async fn show(_req: Request) -> &'static str { "{}" }
/// ```
pub trait Node {
    /// Registers this node's routes. Stops at, and returns, the first error
    /// raised by the target.
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error>;

    /// Hides the concrete type behind [`AnyNode`]. Erasing an [`AnyNode`]
    /// returns it as-is.
    fn erase(self) -> AnyNode
    where
        Self: Sized + Send + Sync + 'static,
    {
        AnyNode::new(self)
    }

    /// Applies `modifier` to this node, handing it the node already erased.
    fn modifier<M: Modifier>(self, modifier: M) -> M::Output
    where
        Self: Sized + Send + Sync + 'static,
    {
        modifier.apply(Content::new(self))
    }

    /// Runs `middleware` in front of every route in this node, after any
    /// middleware contributed by enclosing scopes.
    fn middleware<I>(self, middleware: I) -> MiddlewareScope<Content>
    where
        I: IntoIterator<Item = BoxedMiddleware>,
        Self: Sized + Send + Sync + 'static,
    {
        self.modifier(MiddlewareModifier::new(middleware))
    }

    /// Mounts every route in this node under `path`.
    fn prefix(self, path: impl Into<Path>) -> PathScope<Content>
    where
        Self: Sized + Send + Sync + 'static,
    {
        self.modifier(PathModifier::new(path))
    }
}

/// Boots `node` into `routes`.
///
/// Registration is fail-fast: the first error aborts the walk and is returned
/// unchanged. Routes registered before the failure stay registered; whether
/// that matters is up to the target.
pub fn boot<N: Node + ?Sized>(node: &N, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
    let _span = debug_span!("boot").entered();
    debug!("booting route tree");
    node.boot(routes).inspect_err(|e| error!(error = %e, "route tree failed to boot"))
}

// ── Std impls ────────────────────────────────────────────────────────────────

/// The empty node. Registers nothing.
impl Node for () {
    fn boot(&self, _routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        Ok(())
    }
}

/// Zero-or-one node. `None` registers nothing.
impl<N: Node> Node for Option<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        match self {
            Some(node) => node.boot(routes),
            None => Ok(()),
        }
    }
}

impl<N: Node + ?Sized> Node for Box<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        (**self).boot(routes)
    }
}

impl<N: Node + ?Sized> Node for std::sync::Arc<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        (**self).boot(routes)
    }
}
