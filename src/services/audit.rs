use std::sync::Arc;
use uuid::Uuid;

use crate::api::{ApiClient, ListParams, ListResponse};
use crate::error::ClientError;
use crate::models::{AuditFilters, AuditLogEntry};
use crate::query::Resource;

/// Read-only view over the audit log
#[derive(Clone)]
pub struct AuditService {
    resource: Resource<AuditLogEntry>,
}

impl AuditService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            resource: Resource::new(api),
        }
    }

    pub async fn list(
        &self,
        params: ListParams,
        filters: &AuditFilters,
    ) -> Result<ListResponse<AuditLogEntry>, ClientError> {
        self.resource.list(params, filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<AuditLogEntry, ClientError> {
        self.resource.get(id).await
    }
}
