//! Reusable node transformations.
//!
//! A [`Modifier`] receives the node it is applied to and returns a new node
//! that wraps it. The node arrives as [`Content`], already erased, so a
//! modifier never needs to know what it is wrapping.
//!
//! ```rust
//! use arbor::{get, Content, Group, Modifier, Node, PathScope, Request};
//!
//! /// Mounts a subtree under `/v1`.
//! struct V1;
//!
//! impl Modifier for V1 {
//!     type Output = PathScope<Content>;
//!
//!     fn apply(self, content: Content) -> Self::Output {
//!         Group::path("v1", content)
//!     }
//! }
//!
//! async fn users(_req: Request) -> &'static str { "[]" }
//!
//! let tree = get("users", users).modifier(V1);   // GET /v1/users
//! # let _ = tree;
//! ```

use crate::erased::AnyNode;
use crate::error::Error;
use crate::group::{MiddlewareScope, PathScope};
use crate::middleware::BoxedMiddleware;
use crate::node::Node;
use crate::path::Path;
use crate::routes::RoutesBuilder;

/// A transformation from one node to a node wrapping it.
pub trait Modifier {
    type Output: Node;

    fn apply(self, content: Content) -> Self::Output;
}

/// The node a [`Modifier`] is applied to.
#[derive(Clone, Debug)]
pub struct Content(AnyNode);

impl Content {
    pub(crate) fn new<N: Node + Send + Sync + 'static>(node: N) -> Self {
        Self(node.erase())
    }
}

impl Node for Content {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.0.boot(routes)
    }

    fn erase(self) -> AnyNode {
        self.0
    }
}

/// Backs [`Node::middleware`].
pub struct MiddlewareModifier {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareModifier {
    pub fn new(middleware: impl IntoIterator<Item = BoxedMiddleware>) -> Self {
        Self { middleware: middleware.into_iter().collect() }
    }
}

impl Modifier for MiddlewareModifier {
    type Output = MiddlewareScope<Content>;

    fn apply(self, content: Content) -> Self::Output {
        MiddlewareScope::new(self.middleware, content)
    }
}

/// Backs [`Node::prefix`].
pub struct PathModifier {
    path: Path,
}

impl PathModifier {
    pub fn new(path: impl Into<Path>) -> Self {
        Self { path: path.into() }
    }
}

impl Modifier for PathModifier {
    type Output = PathScope<Content>;

    fn apply(self, content: Content) -> Self::Output {
        PathScope::new(self.path, content)
    }
}
