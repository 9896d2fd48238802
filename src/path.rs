//! Route path segments.
//!
//! Paths are written the way you would type them into a browser bar, minus
//! the host: `"users/:id"`, `"/files/*rest"`, `"health"`. Leading, trailing
//! and doubled slashes are ignored. The empty path is valid and means "the
//! path of the enclosing scope".
//!
//! | Written | Segment |
//! |---|---|
//! | `users` | [`PathSegment::Constant`] |
//! | `:id` or `{id}` | [`PathSegment::Param`] |
//! | `*` | [`PathSegment::Anything`] |
//! | `*rest`, `{*rest}` or `**` | [`PathSegment::CatchAll`] |
//!
//! Braces in a constant segment are literal: `"a{b}c"` only matches `/a{b}c`.

use std::fmt;

/// One `/`-separated piece of a route path.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    Constant(String),
    Param(String),
    /// Exactly one segment, with any value. Its value is available as the
    /// parameter `_0`, `_1`, … counting anonymous segments from the left.
    Anything,
    CatchAll(String),
}

impl PathSegment {
    /// Parses a single segment. Never fails; the router rejects malformed
    /// patterns (e.g. a catch-all that is not last) when the route is registered.
    pub fn parse(segment: &str) -> Self {
        if segment == "*" {
            return Self::Anything;
        }
        if segment == "**" {
            return Self::CatchAll("catchall".to_owned());
        }
        if let Some(name) = segment.strip_prefix(':') {
            return Self::Param(name.to_owned());
        }
        if let Some(name) = segment.strip_prefix('*') {
            return Self::CatchAll(name.to_owned());
        }
        if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            return match inner.strip_prefix('*') {
                Some(name) => Self::CatchAll(name.to_owned()),
                None => Self::Param(inner.to_owned()),
            };
        }
        Self::Constant(segment.to_owned())
    }
}

impl fmt::Display for PathSegment {
    /// Renders the segment in radix-tree syntax (`{id}`, `{*rest}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(s) => f.write_str(&s.replace('{', "{{").replace('}', "}}")),
            Self::Param(name) => write!(f, "{{{name}}}"),
            Self::Anything => f.write_str("{_}"),
            Self::CatchAll(name) => write!(f, "{{*{name}}}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(segment: &str) -> Self {
        Self::parse(segment)
    }
}

/// An ordered sequence of [`PathSegment`]s.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_segments(self) -> Vec<PathSegment> {
        self.0
    }
}

/// Renders a segment slice as a router pattern. The empty path is `/`.
pub(crate) fn render(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return "/".to_owned();
    }
    let mut anonymous = 0;
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            PathSegment::Anything => {
                out.push_str(&format!("{{_{anonymous}}}"));
                anonymous += 1;
            }
            named => out.push_str(&named.to_string()),
        }
    }
    out
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self(path.split('/').filter(|s| !s.is_empty()).map(PathSegment::parse).collect())
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<PathSegment> for Path {
    fn from(segment: PathSegment) -> Self {
        Self(vec![segment])
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&[PathSegment]> for Path {
    fn from(segments: &[PathSegment]) -> Self {
        Self(segments.to_vec())
    }
}

/// Each array element is one segment, e.g. `["users", ":id"]`.
impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.into_iter().map(PathSegment::parse).collect())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
