// src/models/ui.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// Nome do cookie que guarda o blob de estado de UI.
pub const UI_STORE_COOKIE: &str = "ui-store";

// Sentinela da vista aggregata na convenção do cliente (ver
// `SalonId::as_client`).
pub const ACTIVE_SALON_SENTINEL: i64 = 0;

// Estado de exibição persistido no navegador: sidebar aberta e salão
// "ativo" na convenção do cliente. É estado consultivo, e só isso: a
// autorização no servidor é sempre rederivada dos claims do usuário,
// independente do que o cliente diz estar ativo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub sidebar_open: bool,
    pub active_salon_id: i64,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            sidebar_open: true,
            active_salon_id: ACTIVE_SALON_SENTINEL,
        }
    }
}

impl UiState {
    // Decodifica o blob vindo do cookie. Blob ausente, truncado ou com
    // lixo = estado padrão; nunca erro.
    pub fn decode(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    // Define o salão ativo. Qualquer entrada não finita (ou não
    // numérica, ou não inteira) volta para a sentinela, sem erro.
    pub fn set_active_salon(&mut self, raw: Option<&Value>) {
        self.active_salon_id = coerce_client_salon(raw);
    }

    pub fn set_sidebar(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}

fn coerce_client_salon(raw: Option<&Value>) -> i64 {
    let Some(value) = raw else {
        return ACTIVE_SALON_SENTINEL;
    };
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
                    _ => ACTIVE_SALON_SENTINEL,
                }
            }
        }
        _ => ACTIVE_SALON_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_garbage_yields_default() {
        assert_eq!(UiState::decode(None), UiState::default());
        assert_eq!(UiState::decode(Some("")), UiState::default());
        assert_eq!(UiState::decode(Some("nao-e-json")), UiState::default());
        assert_eq!(UiState::decode(Some("{\"sidebarOpen\":")), UiState::default());
    }

    #[test]
    fn decode_partial_blob_keeps_defaults_for_missing_fields() {
        let state = UiState::decode(Some("{\"activeSalonId\":3}"));
        assert!(state.sidebar_open);
        assert_eq!(state.active_salon_id, 3);
    }

    #[test]
    fn non_finite_active_salon_resets_to_sentinel() {
        let mut state = UiState { sidebar_open: false, active_salon_id: 2 };
        state.set_active_salon(Some(&json!("NaN")));
        assert_eq!(state.active_salon_id, ACTIVE_SALON_SENTINEL);

        state.active_salon_id = 2;
        state.set_active_salon(None);
        assert_eq!(state.active_salon_id, ACTIVE_SALON_SENTINEL);

        state.active_salon_id = 2;
        state.set_active_salon(Some(&Value::Null));
        assert_eq!(state.active_salon_id, ACTIVE_SALON_SENTINEL);

        state.active_salon_id = 2;
        state.set_active_salon(Some(&json!(1.5)));
        assert_eq!(state.active_salon_id, ACTIVE_SALON_SENTINEL);
    }

    #[test]
    fn finite_active_salon_is_stored() {
        let mut state = UiState::default();
        state.set_active_salon(Some(&json!(4)));
        assert_eq!(state.active_salon_id, 4);
        state.set_active_salon(Some(&json!(0)));
        assert_eq!(state.active_salon_id, 0);
    }

    #[test]
    fn encode_decode_round_trip() {
        let state = UiState { sidebar_open: false, active_salon_id: 3 };
        assert_eq!(UiState::decode(Some(&state.encode())), state);
    }
}
