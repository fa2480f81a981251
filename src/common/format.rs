// src/common/format.rs

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rótulo fixo da moeda exibido antes dos valores.
pub const CURRENCY_LABEL: &str = "Bs";

/// `Bs 35.50` — sempre duas casas decimais.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{} {:.2}", CURRENCY_LABEL, rounded)
}

/// Agrupa milhares com ponto (locale es): 12345 -> "12.345".
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "dd MMM, HH:mm" com meses abreviados em espanhol, no fuso da loja.
pub fn format_sale_timestamp<Z>(at: DateTime<Utc>, zone: &Z) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    at.with_timezone(zone)
        .format_localized("%d %b, %H:%M", chrono::Locale::es_ES)
        .to_string()
}

/// Singular/plural simples: 1 venta, 2 ventas.
pub fn pluralize(count: i64, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}
