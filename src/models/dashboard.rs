use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the landing view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub total_products: u64,
    pub total_suppliers: u64,
    pub total_documents: u64,
    pub pending_quotes: u64,
    pub unpaid_invoices: u64,
    pub low_stock_products: u64,
    pub pending_reminders: u64,
    pub revenue_this_month: Decimal,
    pub revenue_this_year: Decimal,
}
