// src/views/dashboard_page.rs

use askama::Template;
use chrono::TimeZone;
use std::fmt::Display;
use uuid::Uuid;

use crate::{
    common::format::{format_grouped, format_money, format_sale_timestamp, pluralize},
    models::dashboard::{DashboardOverview, DashboardQuery, LowStockItem, RecentSale},
    services::dashboard_service::LOW_STOCK_THRESHOLD,
    views::stat_card::{CardColor, Icon, StatCard},
};

const UNAVAILABLE_SUBTITLE: &str = "Dato no disponible";
const MISSING: &str = "—";

// ---
// Faixas de severidade do estoque baixo
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSeverity {
    Out,      // 0 (ou negativo)
    Critical, // 1–5
    Low,      // 6–9
}

impl StockSeverity {
    pub fn from_quantity(quantity: i32) -> Self {
        match quantity {
            q if q <= 0 => StockSeverity::Out,
            1..=5 => StockSeverity::Critical,
            _ => StockSeverity::Low,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            StockSeverity::Out => "bg-red-100 text-red-700",
            StockSeverity::Critical => "bg-orange-100 text-orange-700",
            StockSeverity::Low => "bg-yellow-100 text-yellow-700",
        }
    }
}

// ---
// Forma de pagamento -> ícone e rótulo, com fallback
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Qr,
    Card,
    Other,
}

impl PaymentMethod {
    /// Códigos exatos gravados pelo PDV; qualquer outro (ou nenhum) vira `Other`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("cash") => PaymentMethod::Cash,
            Some("qr") => PaymentMethod::Qr,
            Some("card") => PaymentMethod::Card,
            _ => PaymentMethod::Other,
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            PaymentMethod::Cash => Icon::Banknote,
            PaymentMethod::Qr => Icon::QrCode,
            PaymentMethod::Card | PaymentMethod::Other => Icon::CreditCard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Qr => "QR",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Other => "Otro",
        }
    }
}

// ---
// Linhas prontas para o template
// ---
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockRowView {
    pub product_name: String,
    pub sku: String,
    pub location: String,
    pub quantity: i32,
    pub severity: StockSeverity,
}

impl From<&LowStockItem> for LowStockRowView {
    fn from(item: &LowStockItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            sku: item.sku.clone().unwrap_or_default(),
            location: item
                .location_name
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            quantity: item.quantity,
            severity: StockSeverity::from_quantity(item.quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentSaleRowView {
    pub id: Uuid,
    pub customer: String,
    pub details: String,
    pub total: String,
    pub when: String,
    pub payment: PaymentMethod,
}

impl RecentSaleRowView {
    pub fn new<Z>(sale: &RecentSale, zone: &Z) -> Self
    where
        Z: TimeZone,
        Z::Offset: Display,
    {
        let staff = sale.staff_name.as_deref().unwrap_or(MISSING);
        let location = sale.location_name.as_deref().unwrap_or(MISSING);

        Self {
            id: sale.id,
            customer: sale.customer_name.clone(),
            details: format!("{} · {} · {}", staff, location, pluralize(sale.total_items, "ítem")),
            total: format_money(sale.total),
            when: format_sale_timestamp(sale.created_at, zone),
            payment: PaymentMethod::from_code(sale.payment_method.as_deref()),
        }
    }
}

/// Os quatro cards do topo.
pub fn dashboard_cards(overview: &DashboardOverview) -> Vec<StatCard> {
    let subtitle = |query: DashboardQuery, text: String| {
        if overview.is_available(query) {
            Some(text)
        } else {
            Some(UNAVAILABLE_SUBTITLE.to_string())
        }
    };

    let low_stock_color = if !overview.is_available(DashboardQuery::LowStock) {
        CardColor::Orange
    } else if overview.low_stock_count > 0 {
        CardColor::Red
    } else {
        CardColor::Green
    };

    let low_stock_text = if overview.low_stock_count > 0 {
        "Requieren atención"
    } else {
        "Todo en orden"
    };

    vec![
        StatCard::new(
            "Total Productos",
            overview.total_products.to_string(),
            Icon::Package,
            CardColor::Blue,
            subtitle(DashboardQuery::Products, "Productos activos".into()),
        ),
        StatCard::new(
            "Stock Total",
            format_grouped(overview.total_stock),
            Icon::Layers,
            CardColor::Green,
            subtitle(DashboardQuery::Stock, "Unidades en inventario".into()),
        ),
        StatCard::new(
            "Ventas Hoy",
            format_money(overview.sales_today_total),
            Icon::ShoppingCart,
            CardColor::Purple,
            subtitle(DashboardQuery::SalesToday, pluralize(overview.sales_today_count, "venta")),
        ),
        StatCard::new(
            "Bajo Stock",
            overview.low_stock_count.to_string(),
            Icon::AlertTriangle,
            low_stock_color,
            subtitle(DashboardQuery::LowStock, low_stock_text.into()),
        ),
    ]
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub cards: Vec<StatCard>,
    pub threshold: i32,
    pub low_stock: Vec<LowStockRowView>,
    pub low_stock_unavailable: bool,
    pub recent_sales: Vec<RecentSaleRowView>,
    pub recent_sales_unavailable: bool,
}

impl DashboardPage {
    pub fn from_overview<Z>(overview: &DashboardOverview, zone: &Z) -> Self
    where
        Z: TimeZone,
        Z::Offset: Display,
    {
        Self {
            cards: dashboard_cards(overview),
            threshold: LOW_STOCK_THRESHOLD,
            low_stock: overview.low_stock_items.iter().map(LowStockRowView::from).collect(),
            low_stock_unavailable: !overview.is_available(DashboardQuery::LowStock),
            recent_sales: overview
                .recent_sales
                .iter()
                .map(|sale| RecentSaleRowView::new(sale, zone))
                .collect(),
            recent_sales_unavailable: !overview.is_available(DashboardQuery::RecentSales),
        }
    }
}

#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticePage {
    pub title: String,
    pub message: String,
}
