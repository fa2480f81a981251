// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Perfil sem organização")]
    NoOrganization,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte para o formato de resposta usado pelos extratores.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: "Uno o más campos no son válidos.".into(),
                    details: Some(json!(details)),
                }
            }
            AppError::InvalidToken => ApiError::unauthorized(),
            AppError::NoOrganization => ApiError::no_organization(),
            // O resto vira 500; o detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "Ocurrió un error inesperado.".into(),
                    details: None,
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error().into_response()
    }
}

// Corpo de erro padrão da API
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "Sesión inválida o ausente.".into(),
            details: None,
        }
    }

    pub fn no_organization() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: "Tu perfil no está asociado a ninguna organización.".into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn validation_errors_become_bad_request_with_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("range");
        err.message = Some("fuera de rango".into());
        errors.add("utcOffsetMinutes", err);

        let api = AppError::ValidationError(errors).to_api_error();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["utcOffsetMinutes"][0], "fuera de rango");
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("conexão recusada")).to_api_error();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("conexão"));
    }

    #[test]
    fn session_errors_map_to_401_and_403() {
        assert_eq!(AppError::InvalidToken.to_api_error().status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NoOrganization.to_api_error().status, StatusCode::FORBIDDEN);
    }
}
