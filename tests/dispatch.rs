//! In-process dispatch through a mounted router.

use std::sync::{Arc, Mutex};

use arbor::builder::when;
use arbor::{
    BodyStrategy, Error, Group, Next, Node, Request, Response, Router, get, handler, health,
    middleware, post, routes,
};
use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

type Log = Arc<Mutex<Vec<String>>>;

/// Middleware that appends its name to `log` on the way in.
fn logging(log: &Log, name: &'static str) -> arbor::BoxedMiddleware {
    let log = Arc::clone(log);
    middleware::boxed(move |req: Request, next: Next| {
        log.lock().unwrap().push(name.to_owned());
        next.run(req)
    })
}

fn request(method: http::Method, path: &str) -> Request {
    Request::new(method, path)
}

async fn ok(_req: Request) -> &'static str {
    "ok"
}

async fn echo(req: Request) -> String {
    String::from_utf8_lossy(req.body()).into_owned()
}

#[tokio::test]
async fn middleware_runs_outermost_first() {
    let log = Log::default();
    let tree = (
        Group::middleware([logging(&log, "foo")], routes![
            get("A", ok),
            Group::middleware([logging(&log, "bar"), logging(&log, "biz")], get("B", ok)),
        ]),
        Group::middleware([logging(&log, "baz")], get("C", ok)),
    );
    let router = Router::new().mount(tree).unwrap();

    for (path, expected) in [
        ("/A", vec!["foo"]),
        ("/B", vec!["foo", "bar", "biz"]),
        ("/C", vec!["baz"]),
    ] {
        log.lock().unwrap().clear();
        let res = router.respond(request(http::Method::GET, path)).await;
        assert_eq!(res.status_code(), StatusCode::OK, "{path}");
        assert_eq!(*log.lock().unwrap(), expected, "{path}");
    }
}

#[tokio::test]
async fn middleware_can_rewrite_the_response() {
    let stamp = middleware::boxed(|req: Request, next: Next| async move {
        let mut res = next.run(req).await;
        res.insert_header("x-stamped", "yes");
        res
    });
    let deny = middleware::boxed(|_req: Request, _next: Next| async {
        Response::status(StatusCode::UNAUTHORIZED)
    });
    let router = Router::new()
        .mount(routes![
            get("open", ok).middleware([stamp]),
            get("closed", ok).middleware([deny]),
        ])
        .unwrap();

    let res = router.respond(request(http::Method::GET, "/open")).await;
    assert_eq!(res.header("x-stamped"), Some("yes"));

    let res = router.respond(request(http::Method::GET, "/closed")).await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn params_and_catch_alls_reach_the_handler() {
    let router = Router::new()
        .mount(Group::path("files", routes![
            get("meta/:id", handler::sync(|req: Request| {
                format!("meta {}", req.param("id").unwrap_or_default())
            })),
            get("raw/*path", handler::sync(|req: Request| {
                format!("file {}", req.param("path").unwrap_or_default())
            })),
        ]))
        .unwrap();

    let res = router.respond(request(http::Method::GET, "/files/meta/7")).await;
    assert_eq!(res.body(), b"meta 7");

    let res = router.respond(request(http::Method::GET, "/files/raw/a/b.txt")).await;
    assert_eq!(res.body(), b"file a/b.txt");
}

#[tokio::test]
async fn unknown_routes_answer_404_or_405() {
    let router = Router::new().mount(get("only-get", ok)).unwrap();

    let res = router.respond(request(http::Method::GET, "/nowhere")).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = router.respond(request(http::Method::POST, "/only-get")).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("GET"));

    let custom = http::Method::from_bytes(b"PURGE").unwrap();
    let res = router.respond(request(custom, "/only-get")).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn body_limits_apply_per_route() {
    let router = Router::new()
        .with_max_body_size(8)
        .mount(routes![
            post("default", echo),
            post("roomy", echo).body(BodyStrategy::Collect(Some(64))),
        ])
        .unwrap();
    let body = || Full::new(Bytes::from_static(b"twelve bytes"));

    let res = router
        .respond(request(http::Method::POST, "/default").with_body(body()))
        .await;
    assert_eq!(res.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    let res = router
        .respond(request(http::Method::POST, "/roomy").with_body(body()))
        .await;
    assert_eq!(res.body(), b"twelve bytes");
}

#[tokio::test]
async fn health_routes_answer() {
    let router = Router::new().mount(health::routes()).unwrap();

    let res = router.respond(request(http::Method::GET, "/healthz")).await;
    assert_eq!(res.body(), b"ok");
    let res = router.respond(request(http::Method::GET, "/readyz")).await;
    assert_eq!(res.body(), b"ready");
}

#[test]
fn conflicting_routes_fail_the_mount() {
    let tree = routes![
        get("users/:id", ok),
        when(true, || Group::path("users", get(":id", ok))),
    ];
    let err = Router::new().mount(tree).unwrap_err();
    assert!(matches!(err, Error::Route { ref path, .. } if path == "/users/{id}"));
}

#[test]
fn routes_are_listed_in_boot_order() {
    let router = Router::new()
        .mount(routes![
            health::routes(),
            Group::path("api", post("users", ok))
                .middleware([middleware::boxed(middleware::Trace)]),
        ])
        .unwrap();

    let listed: Vec<(String, String)> = router
        .routes()
        .iter()
        .map(|r| (r.method.to_string(), r.path.clone()))
        .collect();
    assert_eq!(listed, [
        ("GET".to_owned(), "/healthz".to_owned()),
        ("GET".to_owned(), "/readyz".to_owned()),
        ("POST".to_owned(), "/api/users".to_owned()),
    ]);
    assert_eq!(router.routes()[2].middleware, ["trace"]);
}
