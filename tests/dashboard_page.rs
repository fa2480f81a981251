// tests/dashboard_page.rs

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use common::{app, low_stock_row, profile_in, sale_row, send, token_for, MemoryStore};
use painel_estoque::models::dashboard::{DashboardQuery, RecentSaleRow, SaleTotalRow};

fn page_with_cookie(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/")
        .header(header::COOKIE, format!("access_token={}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn anonymous_visitor_gets_login_notice() {
    let (status, body) = send(
        app(MemoryStore::default()),
        Request::builder().uri("/dashboard").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Sesión requerida"));
}

#[tokio::test]
async fn user_without_organization_gets_notice() {
    let profile = profile_in(None);
    let token = token_for(profile.id);
    let store = MemoryStore {
        profiles: vec![profile],
        ..Default::default()
    };

    let (status, body) = send(app(store), page_with_cookie(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Sin organización"));
}

#[tokio::test]
async fn page_renders_cards_and_lists() {
    let profile = profile_in(Some(Uuid::new_v4()));
    let token = token_for(profile.id);
    let now = Utc::now();

    let store = MemoryStore {
        profiles: vec![profile],
        active_products: 1250,
        sales: vec![
            SaleTotalRow { total: Decimal::from_str("25.5").unwrap(), created_at: now },
            SaleTotalRow { total: Decimal::from(10), created_at: now },
        ],
        low_stock: vec![low_stock_row("Arroz Grano de Oro", 0), low_stock_row("Leche PIL", 7)],
        recent: vec![RecentSaleRow {
            id: Uuid::new_v4(),
            total: Decimal::from_str("48.9").unwrap(),
            payment_method: Some("cash".into()),
            created_at: now,
            customer_name: Some("Carla Mamani".into()),
            staff_name: Some("Ana Quispe".into()),
            location_name: Some("Sucursal Centro".into()),
            item_quantities: vec![1],
        }],
        ..Default::default()
    };

    let (status, body) = send(app(store), page_with_cookie(&token)).await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("Total Productos"));
    assert!(body.contains("1250"));
    assert!(body.contains("Bs 35.50"));
    assert!(body.contains("2 ventas"));
    assert!(body.contains("Requieren atención"));
    assert!(body.contains("Arroz Grano de Oro"));
    assert!(body.contains("bg-red-100 text-red-700"));
    assert!(body.contains("bg-yellow-100 text-yellow-700"));
    assert!(body.contains("Carla Mamani"));
    assert!(body.contains("Ana Quispe · Sucursal Centro · 1 ítem"));
    assert!(body.contains("Bs 48.90"));
    assert!(body.contains(r#"data-lucide="banknote""#));
}

#[tokio::test]
async fn bearer_header_also_works_for_the_page() {
    let profile = profile_in(Some(Uuid::new_v4()));
    let token = token_for(profile.id);
    let store = MemoryStore {
        profiles: vec![profile],
        ..Default::default()
    };

    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(store), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Todo en orden"));
    assert!(body.contains("No hay productos con stock bajo"));
    assert!(body.contains("No hay ventas registradas"));
}

#[tokio::test]
async fn failed_section_shows_notice_instead_of_empty_state() {
    let profile = profile_in(Some(Uuid::new_v4()));
    let token = token_for(profile.id);
    let store = MemoryStore {
        profiles: vec![profile],
        active_products: 3,
        failing: vec![DashboardQuery::RecentSales, DashboardQuery::Stock],
        ..Default::default()
    };

    let (status, body) = send(app(store), page_with_cookie(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No se pudo cargar esta sección"));
    assert!(!body.contains("No hay ventas registradas"));
    assert!(body.contains("Dato no disponible"));
    assert!(body.contains("No hay productos con stock bajo"));
}

#[tokio::test]
async fn missing_payment_method_uses_the_default_icon() {
    let profile = profile_in(Some(Uuid::new_v4()));
    let token = token_for(profile.id);
    let store = MemoryStore {
        profiles: vec![profile],
        recent: vec![sale_row(None, Utc::now())],
        ..Default::default()
    };

    let (status, body) = send(app(store), page_with_cookie(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-lucide="credit-card""#));
    assert!(body.contains(r#"title="Otro""#));
    assert!(body.contains("Ana Quispe · — · 5 ítems"));
    assert!(!body.contains("No se pudo cargar esta sección"));
}

#[tokio::test]
async fn session_lookup_failure_renders_error_page() {
    let profile = profile_in(Some(Uuid::new_v4()));
    let token = token_for(profile.id);
    let store = MemoryStore {
        profiles: vec![profile],
        profile_lookup_fails: true,
        ..Default::default()
    };

    let (status, body) = send(app(store), page_with_cookie(&token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Servicio no disponible"));
    assert!(body.contains("<html"));
    assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
}
