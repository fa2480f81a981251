// src/middleware/auth.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::auth::{Profile, SessionState},
};

// Cookie usado pelo navegador quando não há cabeçalho Authorization
pub const SESSION_COOKIE: &str = "access_token";

// Extrator com o estado da sessão já resolvido (nunca rejeita por falta de login)
pub struct Session(pub SessionState);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, state).await;

        let session = state
            .auth_service
            .resolve_session(token.as_deref())
            .await?;

        Ok(Session(session))
    }
}

// Extrator para as rotas da API: exige usuário com organização
pub struct OrganizationContext {
    pub organization_id: Uuid,
    pub profile: Profile,
}

impl FromRequestParts<AppState> for OrganizationContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Session(session) = Session::from_request_parts(parts, state)
            .await
            .map_err(|e| e.to_api_error())?;

        match session {
            SessionState::Authenticated {
                profile,
                organization_id,
            } => Ok(OrganizationContext {
                organization_id,
                profile,
            }),
            SessionState::Unauthenticated => Err(AppError::InvalidToken.to_api_error()),
            SessionState::NoOrganization => Err(AppError::NoOrganization.to_api_error()),
        }
    }
}

// "Authorization: Bearer <token>" tem prioridade sobre o cookie
async fn extract_token(parts: &mut Parts, state: &AppState) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
