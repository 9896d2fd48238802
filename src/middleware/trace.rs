//! Per-request tracing middleware.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Wraps each request in a span carrying method and path, and logs the
/// status and latency once the rest of the chain has answered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        let started = Instant::now();
        Box::pin(
            async move {
                let res = next.run(req).await;
                info!(
                    status = res.status_code().as_u16(),
                    latency_us = started.elapsed().as_micros() as u64,
                    "request finished"
                );
                res
            }
            .instrument(span),
        )
    }

    fn name(&self) -> &str {
        "trace"
    }
}
