use std::sync::Arc;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::{BackupInfo, SystemInfo};
use crate::query::QueryKey;
use crate::types::Domain;

#[derive(Clone)]
pub struct AdminService {
    api: Arc<ApiClient>,
}

impl AdminService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn system_info(&self) -> Result<SystemInfo, ClientError> {
        cached(
            &self.api,
            QueryKey::new(Domain::Admin, "system-info"),
            ApiRequest::get(endpoints::ADMIN_SYSTEM_INFO),
        )
        .await
    }

    pub async fn backup_info(&self) -> Result<BackupInfo, ClientError> {
        cached(
            &self.api,
            QueryKey::new(Domain::Admin, "backup-info"),
            ApiRequest::get(endpoints::ADMIN_BACKUP_INFO),
        )
        .await
    }
}
