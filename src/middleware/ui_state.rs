// src/middleware/ui_state.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::models::ui::{UiState, UI_STORE_COOKIE};

// Extrator do estado de UI persistido no cookie `ui-store`. Em vez de
// um singleton global, o estado chega como objeto de contexto explícito
// em cada handler que o declara. Blob ausente ou corrompido vira o
// padrão, nunca rejeição.
pub struct UiStateCtx(pub UiState);

impl<S> FromRequestParts<S> for UiStateCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        let ui = UiState::decode(jar.get(UI_STORE_COOKIE).map(|c| c.value()));
        Ok(UiStateCtx(ui))
    }
}
