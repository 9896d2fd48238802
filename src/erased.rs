//! Type-erased nodes.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::node::Node;
use crate::routes::RoutesBuilder;

type BootFn = dyn Fn(&mut dyn RoutesBuilder) -> Result<(), Error> + Send + Sync;

/// A node whose concrete type has been hidden.
///
/// Composed trees have long, unnameable types. `AnyNode` gives them one name
/// so they can be returned from functions, stored in collections and passed
/// across module boundaries. Booting it is indistinguishable from booting the
/// node it was built from.
///
/// ```rust
/// use arbor::{get, AnyNode, Group, Node, Request};
///
/// fn admin_routes(enabled: bool) -> AnyNode {
///     if enabled {
///         Group::path("admin", get("stats", stats)).erase()
///     } else {
///         ().erase()
///     }
/// }
///
/// async fn stats(_req: Request) -> &'static str { "{}" }
/// # let _ = admin_routes(true);
/// ```
#[derive(Clone)]
pub struct AnyNode {
    pub(crate) boot: Arc<BootFn>,
}

impl AnyNode {
    pub fn new<N: Node + Send + Sync + 'static>(node: N) -> Self {
        Self::from_fn(move |routes| node.boot(routes))
    }

    /// A node whose boot is the given function.
    pub fn from_fn<F>(boot: F) -> Self
    where
        F: Fn(&mut dyn RoutesBuilder) -> Result<(), Error> + Send + Sync + 'static,
    {
        Self { boot: Arc::new(boot) }
    }
}

impl Node for AnyNode {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        (self.boot)(routes)
    }

    fn erase(self) -> AnyNode {
        self
    }
}

impl fmt::Debug for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyNode").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::endpoint::get;
    use crate::group::Group;
    use crate::handler::sync;
    use crate::middleware::{Next, boxed};
    use crate::request::Request;
    use crate::routes::testing::Recorder;

    fn tree() -> impl Node + Send + Sync + 'static {
        let ok = || sync(|_req: Request| "ok");
        Group::middleware(
            [boxed(|req: Request, next: Next| next.run(req))],
            (get("a", ok()), Group::path("b", (get("c", ok()), get(":id", ok())))),
        )
    }

    #[test]
    fn erased_boot_matches_direct_boot() {
        let mut direct = Recorder::default();
        tree().boot(&mut direct).unwrap();

        let mut erased = Recorder::default();
        tree().erase().boot(&mut erased).unwrap();

        assert_eq!(direct.routes, erased.routes);
    }

    #[test]
    fn erasing_twice_shares_the_same_boot() {
        let once = tree().erase();
        let twice = once.clone().erase();
        assert!(Arc::ptr_eq(&once.boot, &twice.boot));
    }

    #[test]
    fn from_fn_runs_on_every_boot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let node = AnyNode::from_fn(move |routes| {
            counted.fetch_add(1, Ordering::SeqCst);
            get("x", sync(|_req: Request| "x")).boot(routes)
        });

        let mut recorder = Recorder::default();
        node.boot(&mut recorder).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.paths(), ["/x"]);
    }
}
