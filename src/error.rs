//! Unified error type.

use thiserror::Error;

use crate::method::Method;

/// Boxed error raised by a request body source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by arbor's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// configuration-time failures (an invalid route, an unreadable config file)
/// and infrastructure failures (binding to a port, reading a request body).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    Address(String),

    /// Raised by a registration target that refuses a route. Boot stops at
    /// the first one and hands it back unchanged. [`Router`](crate::Router)
    /// reports invalid and conflicting patterns with matchit's error as the
    /// source; other targets bring their own.
    #[error("invalid route `{method} {path}`: {source}")]
    Route {
        method: Method,
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("request body: {0}")]
    Body(#[source] BoxError),

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}
