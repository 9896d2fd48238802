//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use http::HeaderMap;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};

use crate::error::{BoxError, Error};

/// Request body, either already buffered or still arriving from the peer.
pub enum Body {
    Empty,
    Buffered(Bytes),
    Streaming(UnsyncBoxBody<Bytes, BoxError>),
}

impl Body {
    /// Wraps any `http_body::Body` as a streaming body.
    pub fn stream<B>(body: B) -> Self
    where
        B: hyper::body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        Self::Streaming(body.map_err(Into::into).boxed_unsync())
    }

    /// Reads the whole body into memory, failing once more than `limit` bytes
    /// have arrived.
    pub async fn collect(self, limit: usize) -> Result<Bytes, Error> {
        let mut body = match self {
            Self::Empty => return Ok(Bytes::new()),
            Self::Buffered(bytes) => return Ok(bytes),
            Self::Streaming(body) => body,
        };
        let mut buf = BytesMut::new();
        while let Some(frame) = body.frame().await {
            // Trailers carry no body bytes.
            let Ok(data) = frame.map_err(Error::Body)?.into_data() else {
                continue;
            };
            if buf.len() + data.len() > limit {
                return Err(Error::BodyTooLarge { limit });
            }
            buf.extend_from_slice(&data);
        }
        Ok(buf.freeze())
    }

    pub fn is_buffered(&self) -> bool {
        !matches!(self, Self::Streaming(_))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::Buffered(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Buffered(bytes.into())
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self::Buffered(Bytes::from_static(s.as_bytes()))
    }
}

impl From<Full<Bytes>> for Body {
    fn from(body: Full<Bytes>) -> Self {
        Self::stream(body)
    }
}

/// An incoming HTTP request.
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Body,
    pub(crate) params: HashMap<String, String>,
    pub(crate) body_limit: usize,
}

impl Request {
    /// Builds a request by hand. Useful for driving [`Router::respond`](crate::Router::respond)
    /// in tests without a socket.
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Body::Empty,
            params: HashMap::new(),
            body_limit: crate::config::DEFAULT_MAX_BODY_SIZE,
        }
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub(crate) fn from_hyper(req: hyper::Request<hyper::body::Incoming>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body: Body::stream(body),
            params: HashMap::new(),
            body_limit: crate::config::DEFAULT_MAX_BODY_SIZE,
        }
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Buffered body bytes. Empty while the body is still streaming; routes
    /// using [`BodyStrategy::Collect`](crate::BodyStrategy::Collect) always
    /// see the full body here.
    pub fn body(&self) -> &[u8] {
        match &self.body {
            Body::Buffered(bytes) => &bytes[..],
            Body::Empty | Body::Streaming(_) => &[],
        }
    }

    /// Takes the body out of the request, leaving [`Body::Empty`] behind.
    /// Routes using [`BodyStrategy::Stream`](crate::BodyStrategy::Stream) read
    /// their input this way.
    pub fn take_body(&mut self) -> Body {
        std::mem::replace(&mut self.body, Body::Empty)
    }

    /// The router's default body limit, used when a route collects its body
    /// without an explicit maximum.
    pub fn body_limit(&self) -> usize { self.body_limit }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Buffers a streaming body up to `limit` bytes. A no-op when the body is
    /// already in memory.
    pub(crate) async fn collect_body(&mut self, limit: usize) -> Result<(), Error> {
        if self.body.is_buffered() {
            return Ok(());
        }
        let bytes = self.take_body().collect(limit).await?;
        self.body = Body::Buffered(bytes);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Chunks;
    use super::*;

    #[tokio::test]
    async fn collects_streaming_body_within_limit() {
        let mut req = Request::new(http::Method::POST, "/")
            .with_body(Full::new(Bytes::from_static(b"hello")));
        assert!(req.body().is_empty());
        req.collect_body(16).await.unwrap();
        assert_eq!(req.body(), b"hello");
    }

    #[tokio::test]
    async fn rejects_streaming_body_over_limit() {
        let mut req = Request::new(http::Method::POST, "/")
            .with_body(Full::new(Bytes::from_static(b"too long")));
        let err = req.collect_body(3).await.unwrap_err();
        assert!(matches!(err, Error::BodyTooLarge { limit: 3 }));
    }

    #[tokio::test]
    async fn limit_counts_bytes_across_frames() {
        let body = Body::stream(Chunks::ok(&[b"abc", b"def", b"gh"]));
        assert_eq!(body.collect(8).await.unwrap(), "abcdefgh");

        let body = Body::stream(Chunks::ok(&[b"abc", b"def", b"ghi"]));
        assert!(matches!(body.collect(8).await, Err(Error::BodyTooLarge { limit: 8 })));
    }

    #[tokio::test]
    async fn transport_failure_is_a_body_error() {
        let err = Body::stream(Chunks::broken()).collect(1024).await.unwrap_err();
        assert!(matches!(err, Error::Body(ref source) if source.to_string() == "connection reset"));
    }

    #[tokio::test]
    async fn buffered_body_is_not_recollected() {
        let mut req = Request::new(http::Method::POST, "/").with_body("already here");
        req.collect_body(1).await.unwrap();
        assert_eq!(req.body(), b"already here");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(http::Method::GET, "/").with_header(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("text/plain"),
        );
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
    }
}
