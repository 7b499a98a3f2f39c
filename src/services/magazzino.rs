// src/services/magazzino.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MagazzinoRepository,
    models::{
        authz::{SalonId, UserAccess},
        magazzino::Giacenza,
    },
};

// Regras de negócio do magazzino. Os predicados de autorização rodam
// aqui, sobre o `UserAccess` derivado na autenticação, nunca sobre o
// que o cliente diz ser o salão "ativo".
#[derive(Clone)]
pub struct MagazzinoService {
    magazzino_repo: MagazzinoRepository,
}

impl MagazzinoService {
    pub fn new(magazzino_repo: MagazzinoRepository) -> Self {
        Self { magazzino_repo }
    }

    // Carico: entrada de estoque sem salão de origem. A linha de acesso
    // por salão fica com o provedor (RLS); aqui basta a sessão válida e
    // os dados bem formados.
    pub async fn carico(
        &self,
        salon: SalonId,
        product_id: Uuid,
        qty: Decimal,
    ) -> Result<(), AppError> {
        self.magazzino_repo
            .stock_move(None, Some(salon.as_raw()), product_id, qty, Some("carico"))
            .await?;

        tracing::info!(
            "📦 Carico de {} unidades registrado no salão {}.",
            qty,
            salon.as_raw()
        );
        Ok(())
    }

    // Trasferimento entre salões: criação restrita a coordinator e
    // magazzino; origem e destino precisam ser distintos.
    pub async fn trasferimento(
        &self,
        access: &UserAccess,
        from: SalonId,
        to: SalonId,
        product_id: Uuid,
        qty: Decimal,
    ) -> Result<(), AppError> {
        if !access.can_create_transfer() {
            return Err(AppError::Forbidden(
                "Apenas coordinator e magazzino podem criar transferências.".to_string(),
            ));
        }
        if from == to {
            return Err(AppError::BadRequest(
                "Salão de origem e destino devem ser diferentes.".to_string(),
            ));
        }

        self.magazzino_repo
            .stock_move(
                Some(from.as_raw()),
                Some(to.as_raw()),
                product_id,
                qty,
                Some("trasferimento"),
            )
            .await
    }

    // Vendita: só a reception registra, e só no próprio salão.
    pub async fn vendita(
        &self,
        access: &UserAccess,
        salon: SalonId,
        product_id: Uuid,
        qty: Decimal,
    ) -> Result<(), AppError> {
        if !access.can_sell() {
            return Err(AppError::Forbidden(
                "Apenas a reception pode registrar vendas.".to_string(),
            ));
        }
        if !access.can_access_salon(salon) {
            return Err(AppError::Forbidden(
                "Venda fora do salão atribuído ao usuário.".to_string(),
            ));
        }

        self.magazzino_repo
            .stock_move(Some(salon.as_raw()), None, product_id, qty, Some("vendita"))
            .await
    }

    // Relatório de giacenze. `Centrale` aqui é a vista aggregata: todos
    // os salões de uma vez.
    pub async fn giacenze(
        &self,
        access: &UserAccess,
        vista: SalonId,
    ) -> Result<Vec<Giacenza>, AppError> {
        if !access.role.is_allowed_warehouse_role() {
            return Err(AppError::Forbidden(
                "Papel sem acesso ao módulo de magazzino.".to_string(),
            ));
        }
        if !access.can_access_salon(vista) {
            return Err(AppError::Forbidden(
                "Salão fora do escopo do usuário.".to_string(),
            ));
        }

        let filter = match vista {
            SalonId::Centrale => None,
            SalonId::Salone(_) => Some(vista.as_raw()),
        };
        self.magazzino_repo.giacenze(filter).await
    }
}
