// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{MagazzinoRepository, UserRepository},
    services::{AuthService, MagazzinoService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub magazzino_service: MagazzinoService,
}

impl AppState {
    // Carrega a configuração do ambiente e monta o gráfico de serviços.
    // Se algo faltar, a aplicação não deve subir.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let magazzino_repo = MagazzinoRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, jwt_secret);
        let magazzino_service = MagazzinoService::new(magazzino_repo);

        Ok(Self {
            db_pool,
            auth_service,
            magazzino_service,
        })
    }
}
