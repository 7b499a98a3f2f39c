// src/middleware/edge_gate.rs

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::middleware::auth::ACCESS_TOKEN_COOKIE;

// Filtro grosso de admissão, aplicado antes do roteamento terminar.
// Checa apenas a PRESENÇA do cookie de sessão, nunca assinatura ou
// validade: é a primeira camada de um controle em dois níveis, e a
// checagem autoritativa é o `auth_guard` das rotas de API. Um cookie
// forjado ou expirado passa por aqui e só é rejeitado quando o token é
// de fato decodificado.
//
// Matcher: só `/dashboard…` e `/login`; todos os outros paths passam
// intocados.
pub async fn edge_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let has_session_cookie = jar.get(ACCESS_TOKEN_COOKIE).is_some();

    if path == "/dashboard" || path.starts_with("/dashboard/") {
        if !has_session_cookie {
            return Redirect::temporary("/login").into_response();
        }
    } else if path == "/login" && has_session_cookie {
        return Redirect::temporary("/dashboard").into_response();
    }

    next.run(request).await
}
