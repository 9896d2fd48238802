//! Built-in health-check routes.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from the load balancer. |
//!
//! Mount them next to the application tree:
//!
//! ```rust
//! use arbor::{get, health, routes, Request, Router};
//!
//! async fn index(_req: Request) -> &'static str { "hi" }
//!
//! let router = Router::new().mount(routes![health::routes(), get("", index)]).unwrap();
//! assert_eq!(router.len(), 3);
//! ```
//!
//! To gate readiness on dependencies, mount [`liveness`] alone and bring your
//! own readiness handler.

use crate::endpoint::{Endpoint, get};
use crate::request::Request;
use crate::response::Response;

/// `GET /healthz` and `GET /readyz` with the default handlers.
pub fn routes() -> (Endpoint, Endpoint) {
    (get("healthz", liveness), get("readyz", readiness))
}

/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all, it
/// is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
