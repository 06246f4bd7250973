use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Reporting window for `GET /reports/{period}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportPeriod {
    Monthly { year: i32, month: u32 },
    Quarterly { year: i32, quarter: u32 },
    Annual { year: i32 },
}

impl ReportPeriod {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Monthly { .. } => "monthly",
            Self::Quarterly { .. } => "quarterly",
            Self::Annual { .. } => "annual",
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        match *self {
            Self::Monthly { year, month } => {
                pairs.push(("year".to_string(), year.to_string()));
                pairs.push(("month".to_string(), month.to_string()));
            }
            Self::Quarterly { year, quarter } => {
                pairs.push(("year".to_string(), year.to_string()));
                pairs.push(("quarter".to_string(), quarter.to_string()));
            }
            Self::Annual { year } => {
                pairs.push(("year".to_string(), year.to_string()));
            }
        }
        pairs
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{}-{:02}", year, month),
            Self::Quarterly { year, quarter } => write!(f, "{} Q{}", year, quarter),
            Self::Annual { year } => write!(f, "{}", year),
        }
    }
}

/// Period summary. Breakdown sections vary by period and are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub total_invoiced: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
    #[serde(default)]
    pub total_pending: Decimal,
    #[serde(default)]
    pub tax_collected: Decimal,
    #[serde(default)]
    pub invoice_count: u64,
    #[serde(default)]
    pub quote_count: u64,
    #[serde(flatten)]
    pub breakdown: Map<String, Value>,
}
