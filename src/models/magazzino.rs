// src/models/magazzino.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Validação Customizada
// ---
// Quantidade de uma movimentação de estoque: estritamente positiva.
pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if val <= &Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("exclusive_min".into(), &0.0);
        err.message = Some("A quantidade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Carico (entrada de estoque, sem salão de origem)
// ---
// O `salon_id` chega como JSON cru e passa por `SalonId::from_claim` no
// handler: valor fora de [1,5] é rejeitado, nunca ajustado.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaricoPayload {
    #[schema(value_type = Option<i32>)]
    pub salon_id: Option<Value>,

    pub product_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub qty: Decimal,
}

// ---
// Payload: Trasferimento entre salões
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrasferimentoPayload {
    #[schema(value_type = Option<i32>)]
    pub from_salon_id: Option<Value>,

    #[schema(value_type = Option<i32>)]
    pub to_salon_id: Option<Value>,

    pub product_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub qty: Decimal,
}

// ---
// Payload: Vendita (saída de estoque do salão da reception)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenditaPayload {
    #[schema(value_type = Option<i32>)]
    pub salon_id: Option<Value>,

    pub product_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub qty: Decimal,
}

// Linha do relatório de giacenze (saldo por salão/produto).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Giacenza {
    pub salon_id: i16,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: Decimal,
}
