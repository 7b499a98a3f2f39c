// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        auth::{Claims, SessionTokens, User},
        authz::{SalonId, UserAccess},
    },
};

// Validade dos tokens de sessão.
const ACCESS_TOKEN_DAYS: i64 = 7;
const REFRESH_TOKEN_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    // Verifica as credenciais e emite o par de tokens da sessão.
    pub async fn login_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação de bcrypt em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(SessionTokens {
            access_token: sign_claims(
                &self.jwt_secret,
                user.id,
                chrono::Duration::days(ACCESS_TOKEN_DAYS),
            )?,
            refresh_token: sign_claims(
                &self.jwt_secret,
                user.id,
                chrono::Duration::days(REFRESH_TOKEN_DAYS),
            )?,
        })
    }

    // Valida o access token e recarrega o registro do usuário. Esta é a
    // camada autoritativa: o edge gate só olhou a presença do cookie.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_claims(&self.jwt_secret, token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // Troca o salão ativo do usuário. Só coordinator e magazzino podem;
    // o novo valor já chega validado como `SalonId`. O UPDATE no perfil
    // é a única fonte de verdade do "salão corrente" dali em diante.
    pub async fn switch_salon(
        &self,
        access: &UserAccess,
        user_id: Uuid,
        new_salon: SalonId,
    ) -> Result<(), AppError> {
        if !access.can_switch_salon() {
            return Err(AppError::Forbidden(
                "Apenas coordinator e magazzino podem trocar o salão ativo.".to_string(),
            ));
        }

        self.user_repo.update_salon_id(user_id, new_salon.as_raw()).await?;

        tracing::info!(
            "🔄 Usuário {} agora está vinculado ao salão {}.",
            user_id,
            new_salon.as_raw()
        );
        Ok(())
    }
}

fn sign_claims(
    secret: &str,
    sub: Uuid,
    ttl: chrono::Duration,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + ttl;

    let claims = Claims {
        sub,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

fn decode_claims(secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_with_same_secret() {
        let user_id = Uuid::new_v4();
        let token =
            sign_claims("segredo-de-teste", user_id, chrono::Duration::days(1)).unwrap();
        let claims = decode_claims("segredo-de-teste", &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_fails_with_another_secret() {
        let token =
            sign_claims("segredo-a", Uuid::new_v4(), chrono::Duration::days(1)).unwrap();
        assert!(matches!(
            decode_claims("segredo-b", &token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            decode_claims("segredo", "nao.e.um.jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
