// src/db/store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Profile,
        dashboard::{LowStockRow, RecentSaleRow, SaleTotalRow, StockQuantityRow},
    },
};

/// As leituras de que o painel precisa, todas com escopo de organização.
/// O `DashboardRepository` implementa sobre o Postgres; os testes usam um fake em memória.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    async fn count_active_products(&self, organization_id: Uuid) -> Result<i64, AppError>;

    async fn stock_quantities(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<StockQuantityRow>, AppError>;

    async fn sales_since(
        &self,
        organization_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<SaleTotalRow>, AppError>;

    async fn low_stock_inventory(
        &self,
        organization_id: Uuid,
        threshold: i32,
        limit: i64,
    ) -> Result<Vec<LowStockRow>, AppError>;

    async fn recent_sales(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentSaleRow>, AppError>;
}
