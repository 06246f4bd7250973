use std::ops::Deref;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::{Document, DocumentStatus, DocumentType, EmailSendResult, EmailStatus, StatusChange};
use crate::query::{QueryKey, Resource};
use crate::types::{Domain, Mutation};

/// Quotes, invoices and delivery notes
#[derive(Clone)]
pub struct DocumentService {
    resource: Resource<Document>,
}

impl Deref for DocumentService {
    type Target = Resource<Document>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl DocumentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            resource: Resource::new(api),
        }
    }

    fn api(&self) -> &ApiClient {
        self.resource.api()
    }

    /// Ask the backend to move a document to `status`. The workflow table in
    /// [`crate::documents::workflow`] decides what is offered; the backend
    /// decides what is allowed.
    pub async fn change_status(&self, id: Uuid, status: DocumentStatus) -> Result<Document, ClientError> {
        let request = ApiRequest::post(endpoints::document_change_status(&id)).json(&StatusChange { status })?;
        let document: Document = self.resource.mutate(request, Mutation::StatusChange).await?;
        info!("Document {} is now {}", document.code, document.status);
        Ok(document)
    }

    /// Create a new document of `target` type from an existing one
    pub async fn convert(&self, id: Uuid, target: DocumentType) -> Result<Document, ClientError> {
        let request = ApiRequest::post(endpoints::document_convert(&id)).query("target_type", target);
        let document: Document = self.resource.mutate(request, Mutation::Convert).await?;
        info!("Converted document {} into {} {}", id, target, document.code);
        Ok(document)
    }

    /// Rendered PDF bytes; never cached
    pub async fn pdf(&self, id: Uuid) -> Result<Vec<u8>, ClientError> {
        self.api().fetch_bytes(ApiRequest::get(endpoints::document_pdf(&id))).await
    }

    pub async fn email_status(&self) -> Result<EmailStatus, ClientError> {
        cached(
            self.api(),
            QueryKey::new(Domain::Documents, "email-status"),
            ApiRequest::get(endpoints::DOCUMENTS_EMAIL_STATUS),
        )
        .await
    }

    /// Email the document. Without a recipient the backend uses the client's
    /// address.
    pub async fn send_email(&self, id: Uuid, recipient: Option<&str>) -> Result<EmailSendResult, ClientError> {
        let mut request = ApiRequest::post(endpoints::document_send_email(&id));
        if let Some(recipient) = recipient {
            request = request.query("recipient_email", recipient);
        }
        // Sending may flip the status to `sent`
        self.resource.mutate(request, Mutation::Update).await
    }
}
