// src/handlers/dashboard.rs

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::{offset_from_minutes, validate_utc_offset, AppState},
    middleware::auth::{OrganizationContext, Session},
    models::{auth::SessionState, dashboard::DashboardOverview},
    views::dashboard_page::{DashboardPage, NoticePage},
};

// ---
// Query: fuso opcional para definir o "hoje"
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OverviewQuery {
    /// Deslocamento fixo em minutos em relação ao UTC (ex: -240 para a Bolívia).
    /// Sem ele, vale o fuso configurado no servidor.
    #[validate(custom(function = "validate_utc_offset"))]
    pub utc_offset_minutes: Option<i32>,
}

// GET /  e  GET /dashboard
pub async fn dashboard_page(
    State(app_state): State<AppState>,
    session: Result<Session, AppError>,
) -> Result<Response, AppError> {
    // Falha ao resolver a sessão (ex: banco fora) vira página de aviso, não JSON
    let session = match session {
        Ok(Session(session)) => session,
        Err(e) => {
            tracing::error!("Falha ao resolver a sessão do painel: {}", e);
            return notice(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Servicio no disponible",
                "No pudimos cargar tu sesión. Intenta nuevamente en unos minutos.",
            );
        }
    };

    match session {
        SessionState::Authenticated {
            organization_id, ..
        } => {
            let overview = app_state
                .dashboard_service
                .get_overview(organization_id, Utc::now(), &app_state.timezone)
                .await;

            let page = DashboardPage::from_overview(&overview, &app_state.timezone);
            Ok(Html(page.render()?).into_response())
        }
        SessionState::Unauthenticated => notice(
            StatusCode::UNAUTHORIZED,
            "Sesión requerida",
            "Inicia sesión para ver el panel de tu negocio.",
        ),
        SessionState::NoOrganization => notice(
            StatusCode::FORBIDDEN,
            "Sin organización",
            "Tu perfil no está asociado a ninguna organización.",
        ),
    }
}

fn notice(status: StatusCode, title: &str, message: &str) -> Result<Response, AppError> {
    let page = NoticePage {
        title: title.to_string(),
        message: message.to_string(),
    };
    Ok((status, Html(page.render()?)).into_response())
}

// GET /api/dashboard/overview
#[utoipa::path(
    get,
    path = "/api/dashboard/overview",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Métricas do painel da organização", body = DashboardOverview),
        (status = 400, description = "Parâmetro inválido"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Perfil sem organização")
    ),
    params(OverviewQuery),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    ctx: OrganizationContext,
    Query(query): Query<OverviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error())?;

    tracing::debug!(profile_id = %ctx.profile.id, "Overview solicitado");

    let service = &app_state.dashboard_service;
    let now = Utc::now();

    // Sem offset explícito vale o fuso configurado (com horário de verão)
    let overview = match query.utc_offset_minutes.and_then(offset_from_minutes) {
        Some(offset) => service.get_overview(ctx.organization_id, now, &offset).await,
        None => service.get_overview(ctx.organization_id, now, &app_state.timezone).await,
    };

    Ok((StatusCode::OK, Json(overview)))
}
