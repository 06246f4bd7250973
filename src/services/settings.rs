use std::sync::Arc;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::{CompanySettings, CompanySettingsUpdate};
use crate::query::QueryKey;
use crate::types::{Domain, Mutation};

/// Company profile used on printed documents
#[derive(Clone)]
pub struct SettingsService {
    api: Arc<ApiClient>,
}

impl SettingsService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<CompanySettings, ClientError> {
        cached(
            &self.api,
            QueryKey::new(Domain::Settings, "company"),
            ApiRequest::get(endpoints::COMPANY_SETTINGS),
        )
        .await
    }

    pub async fn update(&self, changes: &CompanySettingsUpdate) -> Result<CompanySettings, ClientError> {
        let request = ApiRequest::put(endpoints::COMPANY_SETTINGS).json(changes)?;
        let settings = self.api.fetch_json(request).await?;
        self.api.cache().invalidate_after(Domain::Settings, Mutation::Update).await;
        Ok(settings)
    }
}
