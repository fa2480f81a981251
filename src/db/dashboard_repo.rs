// src/db/dashboard_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::DashboardStore,
    models::{
        auth::Profile,
        dashboard::{LowStockRow, RecentSaleRow, SaleTotalRow, StockQuantityRow},
    },
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Cada método usa a pool direto: as cinco leituras rodam em paralelo,
// cada uma na sua conexão. Não abrimos transação, é só leitura.
#[async_trait]
impl DashboardStore for DashboardRepository {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, organization_id
            FROM profiles
            WHERE id = $1
            "#,
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    // 1. Total de produtos ativos
    async fn count_active_products(&self, organization_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE organization_id = $1
              AND is_active = true
            "#,
        )
            .bind(organization_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // 2. Estoque total (a soma é feita no serviço)
    async fn stock_quantities(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<StockQuantityRow>, AppError> {
        let rows = sqlx::query_as::<_, StockQuantityRow>(
            r#"
            SELECT i.quantity
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            WHERE p.organization_id = $1
            "#,
        )
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // 3. Vendas a partir da meia-noite local
    async fn sales_since(
        &self,
        organization_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<SaleTotalRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleTotalRow>(
            r#"
            SELECT total, created_at
            FROM sales
            WHERE organization_id = $1
              AND created_at >= $2
            "#,
        )
            .bind(organization_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // 4. Produtos com estoque baixo
    async fn low_stock_inventory(
        &self,
        organization_id: Uuid,
        threshold: i32,
        limit: i64,
    ) -> Result<Vec<LowStockRow>, AppError> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                p.sku,
                l.name AS location_name,
                i.quantity,
                i.min_stock
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            LEFT JOIN locations l ON l.id = i.location_id
            WHERE p.organization_id = $1
              AND i.quantity < $2
            ORDER BY i.quantity ASC
            LIMIT $3
            "#,
        )
            .bind(organization_id)
            .bind(threshold)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // 5. Últimas vendas, com as quantidades de cada item para somar no serviço
    async fn recent_sales(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentSaleRow>, AppError> {
        let rows = sqlx::query_as::<_, RecentSaleRow>(
            r#"
            SELECT
                s.id,
                s.total,
                s.payment_method,
                s.created_at,
                s.customer_name,
                pr.full_name AS staff_name,
                l.name AS location_name,
                ARRAY(
                    SELECT COALESCE(si.quantity, 0)
                    FROM sale_items si
                    WHERE si.sale_id = s.id
                ) AS item_quantities
            FROM sales s
            LEFT JOIN profiles pr ON pr.id = s.profile_id
            LEFT JOIN locations l ON l.id = s.location_id
            WHERE s.organization_id = $1
            ORDER BY s.created_at DESC
            LIMIT $2
            "#,
        )
            .bind(organization_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
