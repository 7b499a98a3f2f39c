// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, edge_gate::edge_gate};

// Monta o router completo. Fica na lib para os testes de integração
// usarem exatamente a mesma árvore de rotas do binário.
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas; /me faz a própria checagem
    // opcional de token)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me));

    // Rotas protegidas pelo guard autoritativo
    let protected_routes = Router::new()
        .route("/switch-salon", post(handlers::auth::switch_salon))
        .route("/magazzino/carico", post(handlers::magazzino::carico))
        .route(
            "/magazzino/trasferimento",
            post(handlers::magazzino::trasferimento),
        )
        .route("/magazzino/giacenze", get(handlers::magazzino::giacenze))
        .route("/vendita", post(handlers::magazzino::vendita))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Estado de UI: consultivo, sem autenticação
    let ui_routes = Router::new().route(
        "/ui-state",
        get(handlers::ui::get_ui_state).put(handlers::ui::update_ui_state),
    );

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected_routes)
        .merge(ui_routes);

    // Páginas mínimas, alvos do edge gate
    let pages = Router::new()
        .route("/login", get(handlers::pages::login_page))
        .route("/dashboard", get(handlers::pages::dashboard_page))
        .route("/dashboard/{*resto}", get(handlers::pages::dashboard_page));

    // Combina tudo no router principal
    Router::new()
        .nest("/api", api)
        .merge(pages)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(axum_middleware::from_fn(edge_gate))
        .with_state(app_state)
}
