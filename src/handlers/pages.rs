// src/handlers/pages.rs

use axum::response::Html;

// Páginas mínimas servidas como alvo do edge gate. A renderização de
// verdade fica no frontend; estas rotas só precisam existir para os
// redirecionamentos terem destino.

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Login</title><h1>Login</h1>")
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html("<!doctype html><title>Dashboard</title><h1>Dashboard</h1>")
}
