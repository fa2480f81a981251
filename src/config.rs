// src/config.rs

use crate::{
    db::{DashboardRepository, DashboardStore},
    services::{auth::AuthService, dashboard_service::DashboardService},
};
use anyhow::Context;
use chrono::FixedOffset;
use chrono_tz::Tz;
use sqlx::postgres::PgPoolOptions;
use std::{env, str::FromStr, sync::Arc, time::Duration};
use validator::{Validate, ValidationError};

// Fuso padrão da loja (IANA): Bolívia
pub const DEFAULT_TIMEZONE: &str = "America/La_Paz";

#[derive(Debug, Clone, Validate)]
pub struct Settings {
    #[validate(length(min = 1, message = "DATABASE_URL não pode ser vazia."))]
    pub database_url: String,

    #[validate(length(min = 16, message = "JWT_SECRET deve ter no mínimo 16 caracteres."))]
    pub jwt_secret: String,

    pub bind_addr: String,

    // Cinco leituras em paralelo por página: menos que isso serializa o lote.
    #[validate(range(min = 1, max = 64, message = "DB_MAX_CONNECTIONS deve estar entre 1 e 64."))]
    pub max_connections: u32,

    // Meia-noite local segue o horário de verão da zona, quando houver.
    pub timezone: Tz,
}

// ---
// Validação Customizada: UTC-12:00 até UTC+14:00
// ---
pub fn validate_utc_offset(minutes: i32) -> Result<(), ValidationError> {
    if !(-720..=840).contains(&minutes) {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &-720);
        err.add_param("max".into(), &840);
        err.message = Some("El desfase UTC debe estar entre -720 y 840 minutos.".into());
        return Err(err);
    }
    Ok(())
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            timezone: parse_timezone(
                &env::var("DASHBOARD_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
            )?,
        };

        settings.validate().context("Configuração inválida")?;
        Ok(settings)
    }
}

pub fn parse_timezone(raw: &str) -> anyhow::Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("DASHBOARD_TIMEZONE inválida: {:?} ({})", raw, e))
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub timezone: Tz,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store: Arc<dyn DashboardStore> = Arc::new(DashboardRepository::new(db_pool));
        Ok(Self::from_store(store, settings.jwt_secret.clone(), settings.timezone))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(
        store: Arc<dyn DashboardStore>,
        jwt_secret: String,
        timezone: Tz,
    ) -> Self {
        Self {
            auth_service: AuthService::new(store.clone(), jwt_secret),
            dashboard_service: DashboardService::new(store),
            timezone,
        }
    }
}
