use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ListFilters, QueryPairs};
use crate::query::ResourceModel;
use crate::types::Domain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub purchase_price: Decimal,
    #[serde(default)]
    pub sale_price: Decimal,
    /// Percentage, e.g. 21
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub minimum_stock: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub purchase_price: Decimal,
    #[serde(default)]
    pub sale_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub minimum_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub low_stock: Option<bool>,
    pub is_active: Option<bool>,
}

impl ListFilters for ProductFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .opt("search", self.search.as_ref())
            .opt("category", self.category.as_ref())
            .opt("low_stock", self.low_stock)
            .opt("is_active", self.is_active)
            .into_vec()
    }
}

impl ResourceModel for Product {
    const DOMAIN: Domain = Domain::Products;

    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filters = ProductFilters;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_low_stock_includes_the_minimum() {
        let product: Product = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "code": "P-001",
            "name": "Tornillo",
            "sale_price": "0.35",
            "current_stock": 5,
            "minimum_stock": 5
        }))
        .unwrap();

        assert!(product.is_low_stock());
        assert_eq!(product.sale_price, Decimal::new(35, 2));
        assert!(product.is_active);
    }

    #[test]
    fn test_filters_render_only_present_values() {
        let filters = ProductFilters {
            category: Some("tornillería".into()),
            low_stock: Some(true),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("category".to_string(), "tornillería".to_string()),
                ("low_stock".to_string(), "true".to_string()),
            ]
        );
    }
}
