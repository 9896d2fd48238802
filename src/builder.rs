//! Composition helpers.
//!
//! Route trees are built with ordinary Rust control flow. These helpers name
//! the common shapes so a tree reads top to bottom:
//!
//! | Control flow | Helper | Node |
//! |---|---|---|
//! | statements in sequence | [`routes!`](crate::routes) | tuple |
//! | `if` | [`when`] | `Option<N>` |
//! | `if let Some(x)` | [`when_some`] | `Option<N>` |
//! | `if … else` | [`either`] | [`Conditional`] |
//! | `for` | [`each`] | [`Spread`] |
//!
//! Every branch is a closure, and only the taken branch's closure runs.
//!
//! ```rust
//! use arbor::builder::{each, either, when};
//! use arbor::{get, handler, routes, Group, Request};
//!
//! let metrics = true;
//! let legacy = false;
//! let ok = || handler::sync(|_req: Request| "ok");
//!
//! let tree = routes![
//!     get("", ok()),
//!     when(metrics, || get("metrics", ok())),
//!     either(legacy, || Group::path("v1", get("users", ok())), || {
//!         Group::path("v2", each(["users", "teams"], |name| get(name, ok())))
//!     }),
//! ];
//! # let _ = tree;
//! ```

use crate::conditional::Conditional;
use crate::sequence::Spread;

/// Combines nodes into one, in order.
///
/// `routes![]` is the empty node `()`, `routes![a]` is `a` itself, and two or
/// more nodes become a tuple. Tuples are nodes up to 16 elements; nest
/// `routes!` calls for longer runs.
#[macro_export]
macro_rules! routes {
    () => {
        ()
    };
    ($node:expr $(,)?) => {
        $node
    };
    ($($node:expr),+ $(,)?) => {
        ($($node,)+)
    };
}

/// One-armed `if`: `content` is built only when `condition` holds.
pub fn when<N>(condition: bool, content: impl FnOnce() -> N) -> Option<N> {
    condition.then(content)
}

/// `if let Some(value)`: `content` is built only when `value` is present.
pub fn when_some<T, N>(value: Option<T>, content: impl FnOnce(T) -> N) -> Option<N> {
    value.map(content)
}

/// `if … else`: exactly one of the two closures runs.
///
/// An `else if` chain nests another `either` (or a trailing [`when`], when the
/// chain has no final `else`) in the `second` closure.
pub fn either<A, B>(
    condition: bool,
    first: impl FnOnce() -> A,
    second: impl FnOnce() -> B,
) -> Conditional<A, B> {
    if condition {
        Conditional::First(first())
    } else {
        Conditional::Second(second())
    }
}

/// `for` loop: one node per item, in iteration order.
pub fn each<I, N>(items: I, content: impl FnMut(I::Item) -> N) -> Spread<N>
where
    I: IntoIterator,
{
    items.into_iter().map(content).collect()
}
