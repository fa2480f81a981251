// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Perfil do usuário (tabela 'profiles'), o id é o mesmo do usuário autenticado
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub organization_id: Option<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário / perfil)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

/// Resultado explícito da resolução da sessão.
/// Nunca assumimos que existe usuário ou organização.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Authenticated {
        profile: Profile,
        organization_id: Uuid,
    },
    Unauthenticated,
    NoOrganization,
}
