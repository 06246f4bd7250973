use std::ops::Deref;
use std::sync::Arc;
use uuid::Uuid;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest, DeleteResponse};
use crate::error::ClientError;
use crate::models::{Course, CourseCreate, Worker};
use crate::query::{QueryKey, Resource};
use crate::types::{Domain, Mutation};

/// Workers and the training courses nested under each one
#[derive(Clone)]
pub struct WorkerService {
    resource: Resource<Worker>,
}

impl Deref for WorkerService {
    type Target = Resource<Worker>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl WorkerService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            resource: Resource::new(api),
        }
    }

    pub async fn courses(&self, worker_id: Uuid) -> Result<Vec<Course>, ClientError> {
        cached(
            self.resource.api(),
            QueryKey::new(Domain::Workers, "courses").param("worker_id", worker_id),
            ApiRequest::get(endpoints::worker_courses(&worker_id)),
        )
        .await
    }

    pub async fn add_course(&self, worker_id: Uuid, course: &CourseCreate) -> Result<Course, ClientError> {
        let request = ApiRequest::post(endpoints::worker_courses(&worker_id)).json(course)?;
        self.resource.mutate(request, Mutation::Create).await
    }

    pub async fn remove_course(&self, worker_id: Uuid, course_id: Uuid) -> Result<DeleteResponse, ClientError> {
        let request = ApiRequest::delete(endpoints::worker_course(&worker_id, &course_id));
        self.resource.mutate(request, Mutation::Delete).await
    }
}
