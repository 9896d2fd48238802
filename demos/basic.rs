//! Minimal arbor example: a route tree with reusable components, a
//! feature-gated branch, middleware and health checks.
//!
//! Run with:
//!   cargo run --example basic
//!   cargo run --example basic -- arbor.toml     # addr / max_body_size
//!
//! Try:
//!   curl http://localhost:3000/api/users/42
//!   curl -X POST http://localhost:3000/api/users -d '{"name":"alice"}'
//!   curl -X DELETE http://localhost:3000/api/users/42
//!   curl http://localhost:3000/api/movies
//!   curl http://localhost:3000/healthz

use arbor::builder::{each, when};
use arbor::{
    Config, Error, Group, Next, Node, Request, Response, RoutesBuilder, Server, delete, get,
    health, middleware, post, routes,
};
use http::StatusCode;
use tracing::info;

/// `/users` resource.
struct Users;

impl Node for Users {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        Group::path("users", routes![
            get(":id", get_user),
            post("", create_user),
            delete(":id", delete_user),
        ])
        .boot(routes)
    }
}

/// `/movies` resource, one route per genre.
struct Movies {
    genres: Vec<&'static str>,
}

impl Node for Movies {
    fn boot(&self, routes: &mut dyn RoutesBuilder) -> Result<(), Error> {
        Group::path("movies", routes![
            get("", list_movies),
            each(self.genres.iter().copied(), |genre| get(genre, list_movies)),
        ])
        .boot(routes)
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };
    let debug_routes = std::env::var_os("ARBOR_DEBUG").is_some();

    let app = routes![
        health::routes(),
        Group::path("api", routes![
            Users,
            Movies { genres: vec!["comedy", "horror"] },
            when(debug_routes, || get("debug", debug_info)),
        ])
        .middleware([middleware::boxed(middleware::Trace), middleware::boxed(request_id)]),
    ];

    Server::from_config(config).run(app).await
}

/// Copies `x-request-id` from the request onto the response.
async fn request_id(req: Request, next: Next) -> Response {
    let id = req.header("x-request-id").map(str::to_owned);
    let mut res = next.run(req).await;
    if let Some(id) = id {
        res.insert_header("x-request-id", &id);
    }
    res
}

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

// The body has already been collected (up to `max_body_size`) by now.
async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    info!(bytes = req.body().len(), "creating user");
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/api/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#.to_owned().into_bytes())
}

async fn delete_user(_req: Request) -> Response {
    Response::status(StatusCode::NO_CONTENT)
}

async fn list_movies(req: Request) -> Response {
    Response::json(format!(r#"{{"path":"{}","movies":[]}}"#, req.path()).into_bytes())
}

async fn debug_info(_req: Request) -> &'static str {
    "debug"
}
