use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::QueryKey;
use crate::api::{ApiClient, ApiRequest, DeleteResponse, ListFilters, ListParams, ListResponse};
use crate::error::ClientError;
use crate::types::{Domain, Mutation};

/// A backend record served under `/{domain}` with the standard CRUD shape
pub trait ResourceModel: DeserializeOwned + Send + Sync + 'static {
    const DOMAIN: Domain;

    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
    type Filters: ListFilters + Default + Send + Sync;

    fn id(&self) -> Uuid;
}

/// Cached queries and invalidating mutations for one resource type
pub struct Resource<T> {
    api: Arc<ApiClient>,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _model: PhantomData,
        }
    }
}

impl<T: ResourceModel> Resource<T> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _model: PhantomData,
        }
    }

    pub fn domain(&self) -> Domain {
        T::DOMAIN
    }

    fn collection_path() -> String {
        format!("/{}", T::DOMAIN.path())
    }

    fn item_path(id: &Uuid) -> String {
        format!("/{}/{}", T::DOMAIN.path(), id)
    }

    pub async fn list(&self, params: ListParams, filters: &impl ListFilters) -> Result<ListResponse<T>, ClientError> {
        let mut pairs = params.query_pairs();
        pairs.extend(filters.query_pairs());

        let key = QueryKey::new(T::DOMAIN, "list").params(pairs.clone());
        let request = ApiRequest::get(Self::collection_path()).query_pairs(pairs);

        self.api
            .cache()
            .query(key, || self.api.fetch_json::<Value>(request.clone()))
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<T, ClientError> {
        let key = QueryKey::new(T::DOMAIN, "detail").param("id", id);
        let request = ApiRequest::get(Self::item_path(&id));

        self.api
            .cache()
            .query(key, || self.api.fetch_json::<Value>(request.clone()))
            .await
    }

    pub async fn create(&self, payload: &T::Create) -> Result<T, ClientError> {
        let request = ApiRequest::post(Self::collection_path()).json(payload)?;
        self.mutate(request, Mutation::Create).await
    }

    pub async fn update(&self, id: Uuid, payload: &T::Update) -> Result<T, ClientError> {
        let request = ApiRequest::put(Self::item_path(&id)).json(payload)?;
        self.mutate(request, Mutation::Update).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        let request = ApiRequest::delete(Self::item_path(&id));
        self.mutate(request, Mutation::Delete).await
    }

    /// Run a write and invalidate what it made stale. Nothing is touched
    /// when the server rejects it.
    pub(crate) async fn mutate<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        mutation: Mutation,
    ) -> Result<R, ClientError> {
        let result = self.api.fetch_json(request).await?;
        self.api.cache().invalidate_after(T::DOMAIN, mutation).await;
        Ok(result)
    }

    pub(crate) fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }
}
