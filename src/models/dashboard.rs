// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// Linhas cruas vindas do banco (uma struct por consulta)
// ---

// Estoque total: só a quantidade de cada registro de inventário
#[derive(Debug, Clone, FromRow)]
pub struct StockQuantityRow {
    pub quantity: Option<i32>,
}

// Vendas de hoje
#[derive(Debug, Clone, FromRow)]
pub struct SaleTotalRow {
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

// Inventário com estoque baixo (join com produto e local)
#[derive(Debug, Clone, FromRow)]
pub struct LowStockRow {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: Option<String>,
    pub location_name: Option<String>,
    pub quantity: i32,
    pub min_stock: Option<i32>,
}

// Últimas vendas (join com perfil, local e itens)
#[derive(Debug, Clone, FromRow)]
pub struct RecentSaleRow {
    pub id: Uuid,
    pub total: Decimal,
    // Vendas antigas podem não ter forma de pagamento
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub staff_name: Option<String>,
    pub location_name: Option<String>,
    pub item_quantities: Vec<i32>,
}

// ---
// Saída do agregador
// ---

/// Identifica cada uma das cinco leituras do painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DashboardQuery {
    Products,
    Stock,
    SalesToday,
    LowStock,
    RecentSales,
}

impl DashboardQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardQuery::Products => "products",
            DashboardQuery::Stock => "stock",
            DashboardQuery::SalesToday => "salesToday",
            DashboardQuery::LowStock => "lowStock",
            DashboardQuery::RecentSales => "recentSales",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: Option<String>,
    pub location_name: Option<String>,
    pub quantity: i32,
    // Vem do banco mas NÃO entra na regra de estoque baixo (limite fixo)
    pub min_stock: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: Uuid,
    pub total: Decimal,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub staff_name: Option<String>,
    pub location_name: Option<String>,
    pub total_items: i64,
}

/// Tudo o que o painel mostra, calculado de uma vez.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub organization_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Meia-noite local (em UTC) usada como início de "hoje".
    pub day_start: DateTime<Utc>,

    pub total_products: i64,
    pub total_stock: i64,
    pub sales_today_total: Decimal,
    pub sales_today_count: i64,
    pub low_stock_count: i64,
    pub low_stock_items: Vec<LowStockItem>,
    pub recent_sales: Vec<RecentSale>,

    /// Leituras que falharam; a métrica correspondente ficou no valor padrão.
    pub unavailable: Vec<DashboardQuery>,
}

impl DashboardOverview {
    pub fn is_available(&self, query: DashboardQuery) -> bool {
        !self.unavailable.contains(&query)
    }
}
