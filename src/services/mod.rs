//! One entry point per backend domain.
//!
//! Plain CRUD domains are a bare [`Resource`]; the rest wrap one and add
//! their extra endpoints. Every read goes through the query cache and every
//! confirmed write invalidates it per the domain rules in [`crate::query`].

pub mod admin;
pub mod audit;
pub mod dashboard;
pub mod documents;
pub mod reminders;
pub mod reports;
pub mod settings;
pub mod transfer;
pub mod workers;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::{ApiClient, ApiRequest};
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::models::{Client, DiaryEntry, Product, Supplier};
use crate::query::{QueryKey, Resource};

pub use admin::AdminService;
pub use audit::AuditService;
pub use dashboard::DashboardService;
pub use documents::DocumentService;
pub use reminders::ReminderService;
pub use reports::ReportService;
pub use settings::SettingsService;
pub use transfer::TransferService;
pub use workers::WorkerService;

pub struct Dragofactu {
    api: Arc<ApiClient>,
    pub clients: Resource<Client>,
    pub products: Resource<Product>,
    pub suppliers: Resource<Supplier>,
    pub documents: DocumentService,
    pub workers: WorkerService,
    pub diary: Resource<DiaryEntry>,
    pub reminders: ReminderService,
    pub audit: AuditService,
    pub reports: ReportService,
    pub admin: AdminService,
    pub dashboard: DashboardService,
    pub settings: SettingsService,
    pub transfer: TransferService,
}

impl Dragofactu {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            clients: Resource::new(api.clone()),
            products: Resource::new(api.clone()),
            suppliers: Resource::new(api.clone()),
            documents: DocumentService::new(api.clone()),
            workers: WorkerService::new(api.clone()),
            diary: Resource::new(api.clone()),
            reminders: ReminderService::new(api.clone()),
            audit: AuditService::new(api.clone()),
            reports: ReportService::new(api.clone()),
            admin: AdminService::new(api.clone()),
            dashboard: DashboardService::new(api.clone()),
            settings: SettingsService::new(api.clone()),
            transfer: TransferService::new(api.clone()),
            api,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(ApiClient::from_config(config)?)))
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }
}

/// GET `request` through the query cache under `key`
pub(crate) async fn cached<T: DeserializeOwned>(
    api: &ApiClient,
    key: QueryKey,
    request: ApiRequest,
) -> Result<T, ClientError> {
    api.cache()
        .query(key, || api.fetch_json::<Value>(request.clone()))
        .await
}
