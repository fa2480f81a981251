// src/views/stat_card.rs

use askama::Template;

/// Ícones do painel (nomes do lucide, renderizados no navegador).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Package,
    Layers,
    ShoppingCart,
    AlertTriangle,
    TrendingDown,
    CreditCard,
    Banknote,
    QrCode,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Package => "package",
            Icon::Layers => "layers",
            Icon::ShoppingCart => "shopping-cart",
            Icon::AlertTriangle => "triangle-alert",
            Icon::TrendingDown => "trending-down",
            Icon::CreditCard => "credit-card",
            Icon::Banknote => "banknote",
            Icon::QrCode => "qr-code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Blue,
    Green,
    Orange,
    Red,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorClasses {
    pub bg: &'static str,
    pub icon: &'static str,
    pub text: &'static str,
}

impl CardColor {
    pub fn classes(&self) -> ColorClasses {
        match self {
            CardColor::Blue => ColorClasses {
                bg: "bg-blue-50",
                icon: "bg-blue-600",
                text: "text-blue-600",
            },
            CardColor::Green => ColorClasses {
                bg: "bg-emerald-50",
                icon: "bg-emerald-600",
                text: "text-emerald-600",
            },
            CardColor::Orange => ColorClasses {
                bg: "bg-amber-50",
                icon: "bg-amber-600",
                text: "text-amber-600",
            },
            CardColor::Red => ColorClasses {
                bg: "bg-red-50",
                icon: "bg-red-600",
                text: "text-red-600",
            },
            CardColor::Purple => ColorClasses {
                bg: "bg-purple-50",
                icon: "bg-purple-600",
                text: "text-purple-600",
            },
        }
    }
}

// Card puramente visual: sem regra de negócio, sem I/O.
#[derive(Debug, Clone, Template)]
#[template(path = "components/stat_card.html")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub icon: Icon,
    pub color: CardColor,
    pub subtitle: Option<String>,
}

impl StatCard {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        icon: Icon,
        color: CardColor,
        subtitle: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            icon,
            color,
            subtitle,
        }
    }
}
