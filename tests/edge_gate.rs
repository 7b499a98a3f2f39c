// tests/edge_gate.rs
//
// O edge gate decide só por presença do cookie de sessão; estes testes
// cobrem o matcher e os dois redirecionamentos, sem banco e sem token
// válido de verdade.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use saloni_backend::middleware::edge_gate::edge_gate;
use tower::util::ServiceExt;

fn gate_app() -> Router {
    Router::new()
        .route("/login", get(|| async { "login" }))
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/dashboard/{*resto}", get(|| async { "dashboard" }))
        .route("/other-path", get(|| async { "other" }))
        .layer(middleware::from_fn(edge_gate))
}

fn request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn dashboard_without_cookie_redirects_to_login() {
    for path in ["/dashboard", "/dashboard/anything", "/dashboard/a/b"] {
        let response = gate_app().oneshot(request(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "{path}"
        );
    }
}

#[tokio::test]
async fn login_with_cookie_redirects_to_dashboard() {
    let response = gate_app()
        .oneshot(request("/login", Some("sb-access-token=qualquer-coisa")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/dashboard"
    );
}

#[tokio::test]
async fn dashboard_with_cookie_passes_through() {
    // Presença basta: o gate não valida o token (camada autoritativa é
    // o auth_guard das rotas de API).
    let response = gate_app()
        .oneshot(request(
            "/dashboard/x",
            Some("sb-access-token=token-forjado"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_without_cookie_passes_through() {
    let response = gate_app().oneshot(request("/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unmatched_paths_bypass_the_gate() {
    let response = gate_app()
        .oneshot(request("/other-path", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Cookie irrelevante fora do matcher.
    let response = gate_app()
        .oneshot(request("/other-path", Some("sb-access-token=abc")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
