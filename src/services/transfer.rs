use std::sync::Arc;
use tracing::info;

use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::{ExportEntity, ImportResult};
use crate::types::Mutation;

/// CSV export and import
#[derive(Clone)]
pub struct TransferService {
    api: Arc<ApiClient>,
}

impl TransferService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn export(&self, entity: ExportEntity) -> Result<Vec<u8>, ClientError> {
        self.api.fetch_bytes(ApiRequest::get(endpoints::export(entity.path()))).await
    }

    /// Upload `csv` as multipart field `file`
    pub async fn import(&self, entity: ExportEntity, file_name: &str, csv: Vec<u8>) -> Result<ImportResult, ClientError> {
        let request = ApiRequest::post(endpoints::import(entity.path())).multipart("file", file_name, "text/csv", csv);
        let result: ImportResult = self.api.fetch_json(request).await?;
        self.api.cache().invalidate_after(entity.domain(), Mutation::Import).await;

        info!("Imported {} {} ({} skipped)", result.imported, entity, result.skipped);
        Ok(result)
    }
}
