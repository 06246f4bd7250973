use std::ops::Deref;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::Reminder;
use crate::query::Resource;
use crate::types::Mutation;

#[derive(Clone)]
pub struct ReminderService {
    resource: Resource<Reminder>,
}

impl Deref for ReminderService {
    type Target = Resource<Reminder>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl ReminderService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            resource: Resource::new(api),
        }
    }

    /// Mark done. Pending counts on the dashboard change with it.
    pub async fn complete(&self, id: Uuid) -> Result<Reminder, ClientError> {
        let request = ApiRequest::post(endpoints::reminder_complete(&id));
        self.resource.mutate(request, Mutation::Complete).await
    }
}
