//! Registration target.
//!
//! A route tree never touches a route table directly. Booting walks the tree
//! and talks to a [`RoutesBuilder`] through three calls: register one route,
//! open a view scoped under a path, open a view scoped under extra middleware.
//! [`Router`](crate::Router) is the production implementation; tests plug in
//! recorders.

use std::fmt;

use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::middleware::BoxedMiddleware;
use crate::path::{self, PathSegment};

/// One fully-resolved registration: the leaf's own method, path and handler,
/// plus the path prefix and middleware chain accumulated from its scopes.
pub struct Route {
    pub method: Method,
    pub path: Vec<PathSegment>,
    /// Outermost scope first. This is the execution order at request time.
    pub middleware: Vec<BoxedMiddleware>,
    pub handler: BoxedHandler,
}

impl Route {
    pub fn new(method: Method, path: Vec<PathSegment>, handler: BoxedHandler) -> Self {
        Self { method, path, middleware: Vec::new(), handler }
    }

    /// The path in router syntax, e.g. `/users/{id}`.
    pub fn pattern(&self) -> String {
        path::render(&self.path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.pattern())
            .field("middleware", &self.middleware.iter().map(|m| m.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Something route registrations can be made against.
pub trait RoutesBuilder {
    /// Records one route. Errors (invalid or conflicting paths) abort the boot.
    fn register(&mut self, route: Route) -> Result<(), Error>;

    /// A view that prefixes every route registered through it with `path`.
    fn grouped_path(&mut self, path: &[PathSegment]) -> Box<dyn RoutesBuilder + '_>;

    /// A view that runs `middleware` after this builder's own chain and before
    /// the handler of every route registered through it.
    fn grouped_middleware(&mut self, middleware: &[BoxedMiddleware]) -> Box<dyn RoutesBuilder + '_>;
}

/// Scoped view over a parent [`RoutesBuilder`].
///
/// Prepends its path and middleware to each route, then forwards to the
/// parent, which prepends its own. Nested views therefore compose outer to
/// inner without ever replacing what an ancestor contributed.
pub struct Grouped<'a> {
    parent: &'a mut dyn RoutesBuilder,
    path: Vec<PathSegment>,
    middleware: Vec<BoxedMiddleware>,
}

impl<'a> Grouped<'a> {
    pub fn path(parent: &'a mut dyn RoutesBuilder, path: &[PathSegment]) -> Self {
        Self { parent, path: path.to_vec(), middleware: Vec::new() }
    }

    pub fn middleware(parent: &'a mut dyn RoutesBuilder, middleware: &[BoxedMiddleware]) -> Self {
        Self { parent, path: Vec::new(), middleware: middleware.to_vec() }
    }
}

impl RoutesBuilder for Grouped<'_> {
    fn register(&mut self, mut route: Route) -> Result<(), Error> {
        route.path.splice(0..0, self.path.iter().cloned());
        route.middleware.splice(0..0, self.middleware.iter().cloned());
        self.parent.register(route)
    }

    fn grouped_path(&mut self, path: &[PathSegment]) -> Box<dyn RoutesBuilder + '_> {
        Box::new(Grouped::path(self, path))
    }

    fn grouped_middleware(&mut self, middleware: &[BoxedMiddleware]) -> Box<dyn RoutesBuilder + '_> {
        Box::new(Grouped::middleware(self, middleware))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording registration target for unit tests.

    use super::*;

    /// Returned for the pattern a [`Recorder`] was told to reject.
    #[derive(Debug, thiserror::Error)]
    #[error("rejected by recorder")]
    pub struct Rejected;

    /// What a recorded registration looked like.
    #[derive(Debug, PartialEq)]
    pub struct Recorded {
        pub method: Method,
        pub path: String,
        pub middleware: Vec<String>,
    }

    #[derive(Default)]
    pub struct Recorder {
        pub routes: Vec<Recorded>,
        /// When set, registering this pattern fails.
        pub reject: Option<String>,
    }

    impl Recorder {
        pub fn paths(&self) -> Vec<&str> {
            self.routes.iter().map(|r| r.path.as_str()).collect()
        }
    }

    impl RoutesBuilder for Recorder {
        fn register(&mut self, route: Route) -> Result<(), Error> {
            let path = route.pattern();
            if self.reject.as_deref() == Some(path.as_str()) {
                return Err(Error::Route { method: route.method, path, source: Box::new(Rejected) });
            }
            self.routes.push(Recorded {
                method: route.method,
                path,
                middleware: route.middleware.iter().map(|m| m.name().to_owned()).collect(),
            });
            Ok(())
        }

        fn grouped_path(&mut self, path: &[PathSegment]) -> Box<dyn RoutesBuilder + '_> {
            Box::new(Grouped::path(self, path))
        }

        fn grouped_middleware(&mut self, middleware: &[BoxedMiddleware]) -> Box<dyn RoutesBuilder + '_> {
            Box::new(Grouped::middleware(self, middleware))
        }
    }
}
