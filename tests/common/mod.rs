// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use uuid::Uuid;

use painel_estoque::{
    common::error::AppError,
    config::AppState,
    db::DashboardStore,
    models::{
        auth::{Claims, Profile},
        dashboard::{DashboardQuery, LowStockRow, RecentSaleRow, SaleTotalRow, StockQuantityRow},
    },
};

pub const SECRET: &str = "segredo-dos-testes-de-integracao";

// Banco em memória: as linhas já vêm "do banco", o serviço faz o resto.
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Vec<Profile>,
    pub active_products: i64,
    pub stock: Vec<StockQuantityRow>,
    pub sales: Vec<SaleTotalRow>,
    pub low_stock: Vec<LowStockRow>,
    pub recent: Vec<RecentSaleRow>,
    pub failing: Vec<DashboardQuery>,
    pub profile_lookup_fails: bool,
    pub seen_since: Mutex<Option<DateTime<Utc>>>,
}

impl MemoryStore {
    fn guard(&self, query: DashboardQuery) -> Result<(), AppError> {
        if self.failing.contains(&query) {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "leitura {:?} indisponível",
                query
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        if self.profile_lookup_fails {
            return Err(AppError::InternalServerError(anyhow::anyhow!("banco fora do ar")));
        }
        Ok(self.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn count_active_products(&self, _organization_id: Uuid) -> Result<i64, AppError> {
        self.guard(DashboardQuery::Products)?;
        Ok(self.active_products)
    }

    async fn stock_quantities(
        &self,
        _organization_id: Uuid,
    ) -> Result<Vec<StockQuantityRow>, AppError> {
        self.guard(DashboardQuery::Stock)?;
        Ok(self.stock.clone())
    }

    async fn sales_since(
        &self,
        _organization_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<SaleTotalRow>, AppError> {
        self.guard(DashboardQuery::SalesToday)?;
        *self.seen_since.lock().unwrap() = Some(since);
        Ok(self.sales.clone())
    }

    async fn low_stock_inventory(
        &self,
        _organization_id: Uuid,
        _threshold: i32,
        _limit: i64,
    ) -> Result<Vec<LowStockRow>, AppError> {
        self.guard(DashboardQuery::LowStock)?;
        Ok(self.low_stock.clone())
    }

    async fn recent_sales(
        &self,
        _organization_id: Uuid,
        _limit: i64,
    ) -> Result<Vec<RecentSaleRow>, AppError> {
        self.guard(DashboardQuery::RecentSales)?;
        Ok(self.recent.clone())
    }
}

pub fn bolivia() -> Tz {
    chrono_tz::America::La_Paz
}

pub fn app(store: MemoryStore) -> Router {
    let state = AppState::from_store(Arc::new(store), SECRET.to_string(), bolivia());
    painel_estoque::router(state)
}

pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

pub fn profile_in(organization_id: Option<Uuid>) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        full_name: Some("Ana Quispe".into()),
        organization_id,
    }
}

pub fn sale_row(payment_method: Option<&str>, created_at: DateTime<Utc>) -> RecentSaleRow {
    RecentSaleRow {
        id: Uuid::new_v4(),
        total: rust_decimal::Decimal::from(12),
        payment_method: payment_method.map(str::to_string),
        created_at,
        customer_name: None,
        staff_name: Some("Ana Quispe".into()),
        location_name: None,
        item_quantities: vec![2, 3],
    }
}

pub fn low_stock_row(name: &str, quantity: i32) -> LowStockRow {
    LowStockRow {
        product_id: Uuid::new_v4(),
        product_name: name.to_string(),
        sku: Some(format!("SKU-{}", quantity)),
        location_name: Some("Sucursal Centro".into()),
        quantity,
        min_stock: Some(5),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (axum::http::StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
