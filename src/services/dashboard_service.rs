// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardStore,
    models::dashboard::{
        DashboardOverview, DashboardQuery, LowStockItem, LowStockRow, RecentSale, RecentSaleRow,
        SaleTotalRow, StockQuantityRow,
    },
};

/// Abaixo disto (estritamente) o item é "estoque baixo". Não configurável.
pub const LOW_STOCK_THRESHOLD: i32 = 10;
pub const LOW_STOCK_LIMIT: usize = 10;
pub const RECENT_SALES_LIMIT: usize = 5;
pub const DIRECT_SALE_PLACEHOLDER: &str = "Venta directa";

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DashboardStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DashboardStore>) -> Self {
        Self { store }
    }

    /// Dispara as cinco leituras em paralelo e só calcula depois que todas terminarem.
    /// Uma leitura que falha vira zero / lista vazia e entra em `unavailable`;
    /// as outras métricas continuam valendo.
    pub async fn get_overview<Z>(
        &self,
        organization_id: Uuid,
        now: DateTime<Utc>,
        zone: &Z,
    ) -> DashboardOverview
    where
        Z: TimeZone + Sync,
    {
        let day_start = local_day_start(now, zone);

        let (products, stock, sales_today, low_stock, recent) = tokio::join!(
            self.store.count_active_products(organization_id),
            self.store.stock_quantities(organization_id),
            self.store.sales_since(organization_id, day_start),
            self.store.low_stock_inventory(
                organization_id,
                LOW_STOCK_THRESHOLD,
                LOW_STOCK_LIMIT as i64
            ),
            self.store.recent_sales(organization_id, RECENT_SALES_LIMIT as i64),
        );

        let mut unavailable = Vec::new();

        let total_products = settle(DashboardQuery::Products, organization_id, products, &mut unavailable);
        let stock_rows = settle(DashboardQuery::Stock, organization_id, stock, &mut unavailable);
        let sales_rows = settle(DashboardQuery::SalesToday, organization_id, sales_today, &mut unavailable);
        let low_stock_rows = settle(DashboardQuery::LowStock, organization_id, low_stock, &mut unavailable);
        let recent_rows = settle(DashboardQuery::RecentSales, organization_id, recent, &mut unavailable);

        let (sales_today_total, sales_today_count) = sum_sales_since(&sales_rows, day_start);
        let low_stock_items = select_low_stock(low_stock_rows);
        let recent_sales = select_recent_sales(recent_rows);

        tracing::debug!(
            %organization_id,
            failed = unavailable.len(),
            "Painel calculado"
        );

        DashboardOverview {
            organization_id,
            generated_at: now,
            day_start,
            total_products,
            total_stock: sum_stock(&stock_rows),
            sales_today_total,
            sales_today_count,
            low_stock_count: low_stock_items.len() as i64,
            low_stock_items,
            recent_sales,
            unavailable,
        }
    }
}

// Isola a falha de uma leitura: loga, marca como indisponível e devolve o padrão.
fn settle<T: Default>(
    query: DashboardQuery,
    organization_id: Uuid,
    result: Result<T, AppError>,
    unavailable: &mut Vec<DashboardQuery>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                %organization_id,
                query = query.as_str(),
                "Leitura do painel falhou, usando valor padrão: {}",
                e
            );
            unavailable.push(query);
            T::default()
        }
    }
}

/// Meia-noite local do instante `now`, devolvida em UTC.
/// Segue o horário de verão da zona; se a meia-noite não existe naquele dia
/// (salto às 00:00), o dia começa na primeira hora válida.
pub fn local_day_start<Z: TimeZone>(now: DateTime<Utc>, zone: &Z) -> DateTime<Utc> {
    let local_midnight = now.with_timezone(zone).date_naive().and_time(NaiveTime::MIN);

    zone.from_local_datetime(&local_midnight)
        .earliest()
        .or_else(|| {
            zone.from_local_datetime(&(local_midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}

pub fn sum_stock(rows: &[StockQuantityRow]) -> i64 {
    rows.iter().map(|row| i64::from(row.quantity.unwrap_or(0))).sum()
}

pub fn sum_sales_since(rows: &[SaleTotalRow], day_start: DateTime<Utc>) -> (Decimal, i64) {
    rows.iter()
        .filter(|sale| sale.created_at >= day_start)
        .fold((Decimal::ZERO, 0), |(total, count), sale| (total + sale.total, count + 1))
}

pub fn select_low_stock(rows: Vec<LowStockRow>) -> Vec<LowStockItem> {
    let mut items: Vec<LowStockItem> = rows
        .into_iter()
        .filter(|row| row.quantity < LOW_STOCK_THRESHOLD)
        .map(|row| LowStockItem {
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            location_name: row.location_name,
            quantity: row.quantity,
            min_stock: row.min_stock,
        })
        .collect();

    // sort_by_key é estável: empates mantêm a ordem do banco
    items.sort_by_key(|item| item.quantity);
    items.truncate(LOW_STOCK_LIMIT);
    items
}

pub fn select_recent_sales(mut rows: Vec<RecentSaleRow>) -> Vec<RecentSale> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows.truncate(RECENT_SALES_LIMIT);

    rows.into_iter()
        .map(|row| RecentSale {
            id: row.id,
            total: row.total,
            payment_method: row.payment_method,
            created_at: row.created_at,
            customer_name: row
                .customer_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DIRECT_SALE_PLACEHOLDER.to_string()),
            staff_name: row.staff_name,
            location_name: row.location_name,
            total_items: row.item_quantities.iter().map(|q| i64::from(*q)).sum(),
        })
        .collect()
}
