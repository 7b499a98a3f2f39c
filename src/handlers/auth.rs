// src/handlers/auth.rs

use axum::{
    extract::State,
    http::HeaderMap,
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{
        bearer_or_cookie_token, AccessContext, AuthenticatedUser, ACCESS_TOKEN_COOKIE,
        REFRESH_TOKEN_COOKIE,
    },
    models::{
        auth::{LoginPayload, MeResponse},
        authz::{SalonId, UserAccess},
    },
};

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value)).http_only(true).path("/").build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

// Handler de login: credenciais válidas viram o par de cookies de
// sessão HTTP-only.
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tokens = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    let jar = jar
        .add(session_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token));

    Ok((jar, Json(serde_json::json!({ "ok": true }))))
}

// Handler de logout: limpa os dois cookies (max-age 0) e redireciona
// para a tela de login.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar
        .remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE));

    (jar, Redirect::to("/login"))
}

// Handler de /api/auth/me. Exceção deliberada da taxonomia de erros:
// sem sessão (ou com token inválido) a resposta é 200 com user null,
// nunca 401: o frontend consulta esta rota o tempo todo.
pub async fn me(
    State(app_state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Json<MeResponse> {
    let user = match bearer_or_cookie_token(&headers, &jar) {
        Some(token) => app_state.auth_service.validate_token(&token).await.ok(),
        None => None,
    };

    // O escopo de salões acompanha o perfil, já na convenção do cliente.
    let allowed_salons = user
        .as_ref()
        .map(|u| {
            UserAccess::from_user(u)
                .allowed_salons()
                .iter()
                .map(|s| s.as_client())
                .collect()
        })
        .unwrap_or_default();

    Json(MeResponse { user, allowed_salons })
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SwitchSalonPayload {
    // Cru de propósito: "ausente" e "presente mas inválido" são casos
    // distintos de 400.
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub salon_id: Option<Value>,
}

// Handler da troca de salão ativo.
#[utoipa::path(
    post,
    path = "/api/switch-salon",
    tag = "Auth",
    request_body = SwitchSalonPayload,
    responses(
        (status = 200, description = "Salão ativo atualizado"),
        (status = 400, description = "salon_id ausente ou inválido"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Papel sem permissão de troca"),
        (status = 500, description = "Falha do provedor")
    ),
    security(
        ("api_jwt" = []),
        ("session_cookie" = [])
    )
)]
pub async fn switch_salon(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AccessContext(access): AccessContext,
    Json(payload): Json<SwitchSalonPayload>,
) -> Result<Json<Value>, AppError> {
    // Null explícito conta como ausente.
    let raw = match payload.salon_id {
        None | Some(Value::Null) => return Err(AppError::MissingField("salon_id")),
        Some(raw) => raw,
    };
    let new_salon =
        SalonId::from_claim(Some(&raw)).ok_or(AppError::InvalidSalonId)?;

    app_state
        .auth_service
        .switch_salon(&access, user.id, new_salon)
        .await?;

    // O cliente força um reload completo depois deste ok, para o estado
    // de salão ativo do navegador convergir com o claim novo.
    Ok(Json(serde_json::json!({ "ok": true })))
}
