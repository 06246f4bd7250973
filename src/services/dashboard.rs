use std::sync::Arc;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::DashboardStats;
use crate::query::QueryKey;
use crate::types::Domain;

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<ApiClient>,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ClientError> {
        cached(
            &self.api,
            QueryKey::new(Domain::Dashboard, "stats"),
            ApiRequest::get(endpoints::DASHBOARD_STATS),
        )
        .await
    }
}
