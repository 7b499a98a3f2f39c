// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::User, authz::UserAccess},
};

// Cookies de sessão emitidos pelo provedor de autenticação. HTTP-only,
// path `/`; limpos com max-age 0 no logout.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

// Extrai o bearer token da requisição: header Authorization primeiro,
// cookie de sessão como fallback (é assim que o frontend manda).
pub fn bearer_or_cookie_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }
    jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string())
}

// O middleware autoritativo: decodifica o token, recarrega o usuário e
// deriva o `UserAccess` uma única vez. Tudo que o edge gate deixou
// passar por presença de cookie morre aqui se o token for inválido.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_or_cookie_token(request.headers(), &jar)
        .ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(&token).await?;
    let access = UserAccess::from_user(&user);

    // Insere o usuário e o view-model de acesso nos "extensions"
    request.extensions_mut().insert(user);
    request.extensions_mut().insert(access);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// Extrator do view-model de autorização derivado pelo guard.
pub struct AccessContext(pub UserAccess);

impl<S> FromRequestParts<S> for AccessContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAccess>()
            .cloned()
            .map(AccessContext)
            .ok_or(AppError::InvalidToken)
    }
}
