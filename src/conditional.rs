//! Either/or nodes.

use crate::error::Error;
use crate::node::Node;
use crate::routes::RoutesBuilder;

/// Exactly one of two node shapes, chosen while the tree is being built.
///
/// The branch that was not taken was never constructed, so it can neither
/// register routes nor run any side effects of its own construction.
/// `if … else if … else` chains nest a `Conditional` in the second arm.
///
/// ```rust
/// use arbor::{get, handler, Conditional, Request};
///
/// let debug = cfg!(debug_assertions);
/// let status = if debug {
///     Conditional::First(get("status", handler::sync(|_req: Request| "verbose")))
/// } else {
///     Conditional::Second(())
/// };
/// # let _ = status;
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conditional<A, B> {
    First(A),
    Second(B),
}

impl<A: Node, B: Node> Node for Conditional<A, B> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        match self {
            Self::First(first) => first.boot(routes),
            Self::Second(second) => second.boot(routes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{Endpoint, get};
    use crate::handler::sync;
    use crate::request::Request;
    use crate::routes::testing::Recorder;

    fn leaf(name: &str) -> Endpoint {
        get(name, sync(|_req: Request| "ok"))
    }

    #[test]
    fn only_the_held_branch_boots() {
        let first: Conditional<Endpoint, Endpoint> = Conditional::First(leaf("first"));
        let second: Conditional<Endpoint, Endpoint> = Conditional::Second(leaf("second"));

        let mut recorder = Recorder::default();
        first.boot(&mut recorder).unwrap();
        second.boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/first", "/second"]);
    }
}
