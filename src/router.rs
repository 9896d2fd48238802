//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. The router is the
//! production [`RoutesBuilder`]: mount a route tree into it once at startup,
//! then hand it to [`Server::serve`](crate::Server::serve).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use matchit::Router as MatchitRouter;
use tracing::{debug, info};

use crate::config::DEFAULT_MAX_BODY_SIZE;
use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Next};
use crate::node::{self, Node};
use crate::path::PathSegment;
use crate::request::Request;
use crate::response::Response;
use crate::routes::{Grouped, Route, RoutesBuilder};

/// What a matched path resolves to at request time.
struct Registered {
    chain: Arc<[BoxedMiddleware]>,
    handler: BoxedHandler,
}

/// One registration, as listed by [`Router::routes`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteInfo {
    pub method: Method,
    /// Router syntax, e.g. `/users/{id}`.
    pub path: String,
    /// Middleware names, outermost first.
    pub middleware: Vec<String>,
}

/// The application router.
///
/// ```rust
/// use arbor::{get, Group, Request, Router};
///
/// async fn show(req: Request) -> String {
///     format!("user {}", req.param("id").unwrap_or("?"))
/// }
///
/// let router = Router::new()
///     .mount(Group::path("users", get(":id", show)))
///     .unwrap();
/// assert_eq!(router.routes()[0].path, "/users/{id}");
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Registered>>>,
    registered: Vec<RouteInfo>,
    max_body_size: usize,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            registered: Vec::new(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Body limit handed to collecting routes that don't set their own.
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Boots `tree` into this router.
    ///
    /// Fails with the first registration error. Can be called more than once
    /// to mount several trees side by side.
    pub fn mount(mut self, tree: impl Node) -> Result<Self, Error> {
        let before = self.registered.len();
        node::boot(&tree, &mut self)?;
        info!(routes = self.registered.len() - before, "route tree mounted");
        Ok(self)
    }

    /// Every registration so far, in boot order.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.registered
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Dispatches one request in-process.
    ///
    /// Unknown paths answer `404 Not Found`. A path registered only under
    /// other methods, or a method arbor has no tree for, answers
    /// `405 Method Not Allowed`.
    pub async fn respond(&self, mut req: Request) -> Response {
        let Ok(method) = Method::try_from(&req.method) else {
            return Response::status(StatusCode::METHOD_NOT_ALLOWED);
        };

        let Some((registered, params)) = self.lookup(method, &req.path) else {
            return self.unmatched(&req.path);
        };

        req.params = params;
        req.body_limit = self.max_body_size;
        Next::new(Arc::clone(&registered.chain), Arc::clone(&registered.handler))
            .run(req)
            .await
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(Arc<Registered>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let registered = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((registered, params))
    }

    fn unmatched(&self, path: &str) -> Response {
        let mut allowed: Vec<&str> = self
            .routes
            .iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.as_str())
            .collect();
        if allowed.is_empty() {
            return Response::status(StatusCode::NOT_FOUND);
        }
        allowed.sort_unstable();
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("allow", &allowed.join(", "))
            .no_body()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.registered)
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}

impl RoutesBuilder for Router {
    fn register(&mut self, route: Route) -> Result<(), Error> {
        let path = route.pattern();
        let info = RouteInfo {
            method: route.method,
            path: path.clone(),
            middleware: route.middleware.iter().map(|m| m.name().to_owned()).collect(),
        };
        let registered = Arc::new(Registered {
            chain: route.middleware.into(),
            handler: route.handler,
        });

        self.routes
            .entry(route.method)
            .or_default()
            .insert(path.as_str(), registered)
            .map_err(|e| Error::Route { method: route.method, path, source: e.into() })?;

        debug!(method = %info.method, path = %info.path, middleware = ?info.middleware, "route registered");
        self.registered.push(info);
        Ok(())
    }

    fn grouped_path(&mut self, path: &[PathSegment]) -> Box<dyn RoutesBuilder + '_> {
        Box::new(Grouped::path(self, path))
    }

    fn grouped_middleware(&mut self, middleware: &[BoxedMiddleware]) -> Box<dyn RoutesBuilder + '_> {
        Box::new(Grouped::middleware(self, middleware))
    }
}
