// src/db/magazzino_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::magazzino::Giacenza};

// Repositório do magazzino. Toda movimentação de estoque passa pela
// stored procedure `stock_move` do banco: esta camada não reimplementa
// a transação, só a invoca e repassa falhas.
#[derive(Clone)]
pub struct MagazzinoRepository {
    pool: PgPool,
}

impl MagazzinoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Movimenta `qty` de um produto entre salões. `from_salon` nulo =
    // carico (entrada sem origem); `to_salon` nulo = saída (venda).
    // Saldo insuficiente faz a procedure levantar exceção, que chega
    // aqui como erro de banco.
    pub async fn stock_move(
        &self,
        from_salon: Option<i16>,
        to_salon: Option<i16>,
        product_id: Uuid,
        qty: Decimal,
        note: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "SELECT stock_move($1::smallint, $2::smallint, $3::uuid, $4::numeric, $5::text)",
        )
        .bind(from_salon)
        .bind(to_salon)
        .bind(product_id)
        .bind(qty)
        .bind(note)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Saldos por salão/produto. `salon_id` nulo = vista aggregata
    // (todos os salões, magazzino centrale incluído).
    pub async fn giacenze(&self, salon_id: Option<i16>) -> Result<Vec<Giacenza>, AppError> {
        let rows = sqlx::query_as::<_, Giacenza>(
            r#"
            SELECT g.salon_id, g.product_id, p.name AS product_name, g.quantity
            FROM giacenze g
            JOIN products p ON p.id = g.product_id
            WHERE ($1::smallint IS NULL OR g.salon_id = $1)
            ORDER BY g.salon_id, p.name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
