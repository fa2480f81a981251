pub mod dashboard_page;
pub mod stat_card;
