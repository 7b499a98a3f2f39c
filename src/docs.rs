// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::switch_salon,

        // --- Magazzino ---
        handlers::magazzino::carico,
        handlers::magazzino::trasferimento,
        handlers::magazzino::vendita,
        handlers::magazzino::giacenze,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::MeResponse,
            handlers::auth::SwitchSalonPayload,

            // --- Magazzino ---
            models::magazzino::CaricoPayload,
            models::magazzino::TrasferimentoPayload,
            models::magazzino::VenditaPayload,
            models::magazzino::Giacenza,

            // --- UI ---
            models::ui::UiState,
            handlers::ui::UiStateUpdate,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, sessão e troca de salão ativo"),
        (name = "Magazzino", description = "Movimentações de estoque entre salões"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("sb-access-token"))),
        );
    }
}
