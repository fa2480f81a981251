// src/services/auth.rs

use std::sync::Arc;

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    db::DashboardStore,
    models::auth::{Claims, SessionState},
};

// Só valida sessões emitidas por outro serviço; login/registro não moram aqui.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn DashboardStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: Arc<dyn DashboardStore>, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    /// Usuário atual -> perfil -> organização, sempre com resultado tipado.
    /// Só erros de banco viram `Err`; token ausente ou inválido é `Unauthenticated`.
    pub async fn resolve_session(&self, token: Option<&str>) -> Result<SessionState, AppError> {
        let Some(token) = token else {
            return Ok(SessionState::Unauthenticated);
        };

        let claims = match self.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Token rejeitado: {}", e);
                return Ok(SessionState::Unauthenticated);
            }
        };

        let profile = self.store.find_profile(claims.sub).await?;

        Ok(match profile {
            Some(profile) => match profile.organization_id {
                Some(organization_id) => SessionState::Authenticated {
                    profile,
                    organization_id,
                },
                None => SessionState::NoOrganization,
            },
            None => SessionState::NoOrganization,
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}
