//! Sequences of nodes.
//!
//! Tuples combine a fixed number of nodes of different types; [`Spread`],
//! `Vec` and arrays combine any number of nodes of one type. Either way every
//! child boots against the same target, in declaration order.

use crate::error::Error;
use crate::node::Node;
use crate::routes::RoutesBuilder;

/// A homogeneous run of nodes, typically produced by a loop.
///
/// ```rust
/// use arbor::{get, handler, Request, Spread};
///
/// let versions: Spread<_> = (1..=3)
///     .map(|v| get(format!("v{v}/status"), handler::sync(|_req: Request| "ok")))
///     .collect();
/// assert_eq!(versions.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Spread<N>(Vec<N>);

impl<N> Spread<N> {
    pub fn new(items: impl IntoIterator<Item = N>) -> Self {
        Self(items.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N> Default for Spread<N> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<N> FromIterator<N> for Spread<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<N: Node> Node for Spread<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.0.as_slice().boot(routes)
    }
}

impl<N: Node> Node for [N] {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.iter().try_for_each(|node| node.boot(routes))
    }
}

impl<N: Node, const K: usize> Node for [N; K] {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.as_slice().boot(routes)
    }
}

impl<N: Node> Node for Vec<N> {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        self.as_slice().boot(routes)
    }
}

macro_rules! tuple_node {
    ($($name:ident),+) => {
        impl<$($name: Node),+> Node for ($($name,)+) {
            #[allow(non_snake_case)]
            fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
                let ($($name,)+) = self;
                $($name.boot(routes)?;)+
                Ok(())
            }
        }
    };
}

tuple_node!(A);
tuple_node!(A, B);
tuple_node!(A, B, C);
tuple_node!(A, B, C, D);
tuple_node!(A, B, C, D, E);
tuple_node!(A, B, C, D, E, F);
tuple_node!(A, B, C, D, E, F, G);
tuple_node!(A, B, C, D, E, F, G, H);
tuple_node!(A, B, C, D, E, F, G, H, I);
tuple_node!(A, B, C, D, E, F, G, H, I, J);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K, L);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K, L, M);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K, L, M, N);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O);
tuple_node!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::get;
    use crate::group::Group;
    use crate::handler::sync;
    use crate::request::Request;
    use crate::routes::testing::Recorder;

    fn leaf(name: &str) -> crate::Endpoint {
        get(name, sync(|req: Request| req.path().to_owned()))
    }

    #[test]
    fn tuple_boots_depth_first_left_to_right() {
        let tree = (
            Group::path("A", (leaf("AA"), leaf("AB"))),
            leaf("B"),
            Group::path("C", (leaf("CA"), Group::path("CB", leaf("CBA")))),
            leaf("D"),
        );
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/A/AA", "/A/AB", "/B", "/C/CA", "/C/CB/CBA", "/D"]);
    }

    #[test]
    fn spread_keeps_iteration_order() {
        let tree: Spread<_> = (0..10).map(|i| leaf(&i.to_string())).collect();
        let mut recorder = Recorder::default();
        tree.boot(&mut recorder).unwrap();
        let expected: Vec<String> = (0..10).map(|i| format!("/{i}")).collect();
        assert_eq!(recorder.paths(), expected);
    }

    #[test]
    fn empty_spread_registers_nothing() {
        let mut recorder = Recorder::default();
        Spread::<crate::Endpoint>::default().boot(&mut recorder).unwrap();
        Vec::<crate::Endpoint>::new().boot(&mut recorder).unwrap();
        assert!(recorder.routes.is_empty());
    }

    #[test]
    fn arrays_are_nodes() {
        let mut recorder = Recorder::default();
        [leaf("x"), leaf("y")].boot(&mut recorder).unwrap();
        assert_eq!(recorder.paths(), ["/x", "/y"]);
    }
}
