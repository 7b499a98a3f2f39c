// src/handlers/magazzino.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AccessContext,
    models::{
        authz::SalonId,
        magazzino::{CaricoPayload, Giacenza, TrasferimentoPayload, VenditaPayload},
    },
};

// Converte o campo cru de salão de um payload para `SalonId`,
// distinguindo ausência de valor inválido.
fn salon_from_payload(
    raw: Option<&serde_json::Value>,
    field: &'static str,
) -> Result<SalonId, AppError> {
    match raw {
        None | Some(serde_json::Value::Null) => Err(AppError::MissingField(field)),
        Some(value) => SalonId::from_claim(Some(value)).ok_or(AppError::InvalidSalonId),
    }
}

// ---
// Handler: carico (entrada de estoque)
// ---
#[utoipa::path(
    post,
    path = "/api/magazzino/carico",
    tag = "Magazzino",
    request_body = CaricoPayload,
    responses(
        (status = 200, description = "Carico registrado"),
        (status = 400, description = "Entrada inválida"),
        (status = 401, description = "Não autenticado"),
        (status = 500, description = "Falha do provedor")
    ),
    security(
        ("api_jwt" = []),
        ("session_cookie" = [])
    )
)]
pub async fn carico(
    State(app_state): State<AppState>,
    Json(payload): Json<CaricoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let salon = salon_from_payload(payload.salon_id.as_ref(), "salonId")?;

    app_state
        .magazzino_service
        .carico(salon, payload.product_id, payload.qty)
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "ok": true }))))
}

// ---
// Handler: trasferimento entre salões
// ---
#[utoipa::path(
    post,
    path = "/api/magazzino/trasferimento",
    tag = "Magazzino",
    request_body = TrasferimentoPayload,
    responses(
        (status = 200, description = "Transferência registrada"),
        (status = 400, description = "Entrada inválida"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Papel sem permissão de transferência"),
        (status = 500, description = "Falha do provedor")
    ),
    security(
        ("api_jwt" = []),
        ("session_cookie" = [])
    )
)]
pub async fn trasferimento(
    State(app_state): State<AppState>,
    AccessContext(access): AccessContext,
    Json(payload): Json<TrasferimentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let from = salon_from_payload(payload.from_salon_id.as_ref(), "fromSalonId")?;
    let to = salon_from_payload(payload.to_salon_id.as_ref(), "toSalonId")?;

    app_state
        .magazzino_service
        .trasferimento(&access, from, to, payload.product_id, payload.qty)
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "ok": true }))))
}

// ---
// Handler: vendita
// ---
#[utoipa::path(
    post,
    path = "/api/vendita",
    tag = "Magazzino",
    request_body = VenditaPayload,
    responses(
        (status = 200, description = "Venda registrada"),
        (status = 400, description = "Entrada inválida"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Papel ou salão fora do escopo"),
        (status = 500, description = "Falha do provedor")
    ),
    security(
        ("api_jwt" = []),
        ("session_cookie" = [])
    )
)]
pub async fn vendita(
    State(app_state): State<AppState>,
    AccessContext(access): AccessContext,
    Json(payload): Json<VenditaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let salon = salon_from_payload(payload.salon_id.as_ref(), "salonId")?;

    app_state
        .magazzino_service
        .vendita(&access, salon, payload.product_id, payload.qty)
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "ok": true }))))
}

// Query de giacenze: o id chega na convenção do cliente (0 = vista
// aggregata). Ausente = aggregata.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiacenzeQuery {
    pub salon_id: Option<i64>,
}

// ---
// Handler: relatório de giacenze
// ---
#[utoipa::path(
    get,
    path = "/api/magazzino/giacenze",
    tag = "Magazzino",
    params(
        ("salonId" = Option<i64>, Query, description = "Salão na convenção do cliente; 0 ou ausente = vista aggregata")
    ),
    responses(
        (status = 200, description = "Saldos por salão/produto", body = Vec<Giacenza>),
        (status = 400, description = "Identificador de salão inválido"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Papel ou salão fora do escopo")
    ),
    security(
        ("api_jwt" = []),
        ("session_cookie" = [])
    )
)]
pub async fn giacenze(
    State(app_state): State<AppState>,
    AccessContext(access): AccessContext,
    Query(query): Query<GiacenzeQuery>,
) -> Result<Json<Vec<Giacenza>>, AppError> {
    let raw = query.salon_id.unwrap_or(0);
    let vista = SalonId::from_client(raw).ok_or(AppError::InvalidSalonId)?;

    let rows = app_state.magazzino_service.giacenze(&access, vista).await?;
    Ok(Json(rows))
}
