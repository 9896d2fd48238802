//! Scope nodes.
//!
//! [`PathScope`] and [`MiddlewareScope`] hand their content a scoped view of
//! the registration target, so every descendant picks up the extra path prefix
//! or middleware on top of whatever enclosing scopes already contributed.
//! [`Group`] contributes nothing and exists to give a subtree a single name a
//! modifier can be applied to.

use tracing::trace;

use crate::error::Error;
use crate::middleware::BoxedMiddleware;
use crate::node::Node;
use crate::path::Path;
use crate::routes::RoutesBuilder;

/// Organizational wrapper with no context of its own.
///
/// ```rust
/// use arbor::{get, middleware, Group, Node, Request};
///
/// async fn a(_req: Request) -> &'static str { "a" }
/// async fn b(_req: Request) -> &'static str { "b" }
///
/// let api = Group::path("api", (
///     Group::new((get("a", a), get("b", b)))
///         .middleware([middleware::boxed(middleware::Trace)]),
/// ));
/// # let _ = api;
/// ```
#[derive(Clone, Debug)]
pub struct Group<N> {
    content: N,
}

impl<N: Node> Group<N> {
    pub fn new(content: N) -> Self {
        Self { content }
    }
}

impl Group<()> {
    /// Mounts `content` under `path`. An empty path adds nothing.
    pub fn path<N: Node>(path: impl Into<Path>, content: N) -> PathScope<N> {
        PathScope::new(path, content)
    }

    /// Runs `middleware`, in order, in front of every route in `content`.
    pub fn middleware<N: Node>(
        middleware: impl IntoIterator<Item = BoxedMiddleware>,
        content: N,
    ) -> MiddlewareScope<N> {
        MiddlewareScope::new(middleware, content)
    }
}

impl<N: Node> Node for Group<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.content.boot(routes)
    }
}

/// Prefixes every route in its content with a path.
#[derive(Clone, Debug)]
pub struct PathScope<N> {
    path: Path,
    content: N,
}

impl<N: Node> PathScope<N> {
    pub fn new(path: impl Into<Path>, content: N) -> Self {
        Self { path: path.into(), content }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<N: Node> Node for PathScope<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        if self.path.is_empty() {
            return self.content.boot(routes);
        }
        trace!(path = %self.path, "entering path scope");
        let mut scoped = routes.grouped_path(self.path.segments());
        self.content.boot(&mut *scoped)
    }
}

/// Runs a middleware list in front of every route in its content.
pub struct MiddlewareScope<N> {
    middleware: Vec<BoxedMiddleware>,
    content: N,
}

impl<N: Node> MiddlewareScope<N> {
    pub fn new(middleware: impl IntoIterator<Item = BoxedMiddleware>, content: N) -> Self {
        Self { middleware: middleware.into_iter().collect(), content }
    }

    /// The middleware this scope adds, in execution order.
    pub fn chain(&self) -> &[BoxedMiddleware] {
        &self.middleware
    }
}

impl<N: Node> Node for MiddlewareScope<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        trace!(count = self.middleware.len(), "entering middleware scope");
        let mut scoped = routes.grouped_middleware(&self.middleware);
        self.content.boot(&mut *scoped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{Endpoint, get};
    use crate::handler::{BoxFuture, sync};
    use crate::middleware::{Middleware, Next, boxed};
    use crate::request::Request;
    use crate::routes::testing::Recorder;

    struct Named(&'static str);

    impl Middleware for Named {
        fn handle(&self, req: Request, next: Next) -> BoxFuture {
            next.run(req)
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn leaf(name: &str) -> Endpoint {
        get(name, sync(|_req: Request| "ok"))
    }

    fn names(recorder: &Recorder, index: usize) -> Vec<&str> {
        recorder.routes[index].middleware.iter().map(String::as_str).collect()
    }

    #[test]
    fn nested_paths_concatenate() {
        let tree = Group::path("a", Group::path("b", leaf("")));
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/a/b"]);
    }

    #[test]
    fn multi_segment_and_empty_paths() {
        let tree = (
            Group::path("a/:id", leaf("c")),
            Group::path("", leaf("d")),
            Group::path(Path::new(), Group::path("e", leaf(""))),
        );
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/a/{id}/c", "/d", "/e"]);
    }

    #[test]
    fn nested_middleware_appends_in_declaration_order() {
        let tree = (
            Group::middleware([boxed(Named("foo"))], (
                leaf("A"),
                Group::middleware([boxed(Named("bar")), boxed(Named("biz"))], leaf("B")),
            )),
            Group::middleware([boxed(Named("baz"))], leaf("C")),
        );
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();

        assert_eq!(recorder.paths(), ["/A", "/B", "/C"]);
        assert_eq!(names(&recorder, 0), ["foo"]);
        assert_eq!(names(&recorder, 1), ["foo", "bar", "biz"]);
        assert_eq!(names(&recorder, 2), ["baz"]);
    }

    #[test]
    fn empty_scopes_register_nothing() {
        let tree = (
            Group::middleware([boxed(Named("foo"))], ()),
            Group::path("a", ()),
            Group::new(()),
        );
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        assert!(recorder.routes.is_empty());
    }

    #[test]
    fn group_forwards_target_unchanged() {
        let tree = Group::path("outer", Group::new((leaf("a"), leaf("b"))));
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/outer/a", "/outer/b"]);
    }
}
