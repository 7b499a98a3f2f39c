// src/handlers/ui.rs

use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    middleware::ui_state::UiStateCtx,
    models::ui::{UiState, UI_STORE_COOKIE},
};

// O blob persiste entre sessões do navegador; legível pelo frontend,
// então sem http_only.
fn ui_cookie(state: &UiState) -> Cookie<'static> {
    Cookie::build((UI_STORE_COOKIE, state.encode()))
        .path("/")
        .permanent()
        .build()
}

pub async fn get_ui_state(UiStateCtx(state): UiStateCtx) -> Json<UiState> {
    Json(state)
}

// Atualização parcial do estado de UI.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiStateUpdate {
    pub sidebar_open: Option<bool>,
    // Cru: valor não finito volta para a sentinela, nunca erro.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub active_salon_id: Option<Value>,
}

pub async fn update_ui_state(
    UiStateCtx(mut state): UiStateCtx,
    jar: CookieJar,
    Json(payload): Json<UiStateUpdate>,
) -> (CookieJar, Json<UiState>) {
    if let Some(open) = payload.sidebar_open {
        state.set_sidebar(open);
    }
    if payload.active_salon_id.is_some() {
        state.set_active_salon(payload.active_salon_id.as_ref());
    }

    let jar = jar.add(ui_cookie(&state));
    (jar, Json(state))
}
