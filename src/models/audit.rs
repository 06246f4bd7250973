use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::api::{ListFilters, QueryPairs};
use crate::query::ResourceModel;
use crate::types::Domain;

/// Read-only; the backend writes audit entries itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub username: Option<String>,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<Uuid>,
    #[serde(default)]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditFilters {
    pub user_id: Option<Uuid>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ListFilters for AuditFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .opt("user_id", self.user_id)
            .opt("action", self.action.as_ref())
            .opt("entity_type", self.entity_type.as_ref())
            .opt("date_from", self.date_from)
            .opt("date_to", self.date_to)
            .into_vec()
    }
}

impl ResourceModel for AuditLogEntry {
    const DOMAIN: Domain = Domain::Audit;

    type Create = ();
    type Update = ();
    type Filters = AuditFilters;

    fn id(&self) -> Uuid {
        self.id
    }
}
