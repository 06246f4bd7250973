use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::api::{ListFilters, QueryPairs};
use crate::query::ResourceModel;
use crate::types::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Quote,
    Invoice,
    DeliveryNote,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [Self::Quote, Self::Invoice, Self::DeliveryNote];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Invoice => "invoice",
            Self::DeliveryNote => "delivery_note",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type '{}' (expected quote, invoice or delivery_note)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    NotSent,
    Sent,
    Accepted,
    Rejected,
    Paid,
    PartiallyPaid,
    Cancelled,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 8] = [
        Self::Draft,
        Self::NotSent,
        Self::Sent,
        Self::Accepted,
        Self::Rejected,
        Self::Paid,
        Self::PartiallyPaid,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::NotSent => "not_sent",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown document status '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub code: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub status: DocumentStatus,
    pub client_id: Uuid,
    #[serde(default)]
    pub client_name: Option<String>,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLineInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCreate {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<DocumentLineInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<DocumentLineInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /documents/{id}/change-status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: DocumentStatus,
}

/// Whether the backend can deliver documents by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailStatus {
    pub configured: bool,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub from_address: Option<String>,
}

/// Reply to `POST /documents/{id}/send-email`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSendResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilters {
    pub search: Option<String>,
    pub doc_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub client_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ListFilters for DocumentFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .opt("search", self.search.as_ref())
            .opt("type", self.doc_type)
            .opt("status", self.status)
            .opt("client_id", self.client_id)
            .opt("date_from", self.date_from)
            .opt("date_to", self.date_to)
            .into_vec()
    }
}

impl ResourceModel for Document {
    const DOMAIN: Domain = Domain::Documents;

    type Create = DocumentCreate;
    type Update = DocumentUpdate;
    type Filters = DocumentFilters;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_type_uses_wire_field_name() {
        let doc: Document = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "code": "FAC-2024-0001",
            "type": "delivery_note",
            "status": "partially_paid",
            "client_id": Uuid::new_v4(),
            "issue_date": "2024-03-01",
            "total": 121.0
        }))
        .unwrap();

        assert_eq!(doc.doc_type, DocumentType::DeliveryNote);
        assert_eq!(doc.status, DocumentStatus::PartiallyPaid);
        assert_eq!(doc.total, Decimal::new(121, 0));
        assert!(doc.lines.is_empty());
    }

    #[test]
    fn test_status_parses_from_wire_names() {
        for status in DocumentStatus::ALL {
            assert_eq!(status.as_str().parse::<DocumentStatus>(), Ok(status));
        }
        assert!("archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_filters_use_type_key() {
        let filters = DocumentFilters {
            doc_type: Some(DocumentType::Invoice),
            status: Some(DocumentStatus::Sent),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("type".to_string(), "invoice".to_string()),
                ("status".to_string(), "sent".to_string()),
                ("date_from".to_string(), "2024-01-01".to_string()),
            ]
        );
    }
}
