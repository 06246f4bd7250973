// Client error types
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::api::transport::TransportError;
use crate::store::preferences::Locale;
use crate::store::StoreError;

/// Everything a call into the backend can fail with.
///
/// Three families matter to callers: authentication (`Unauthorized`,
/// `SessionExpired`), validation (`Validation`, carrying per-field messages
/// for inline display) and everything else, which is shown as a generic
/// notification.
#[derive(Debug, Error)]
pub enum ClientError {
    // 401 after the refresh pipeline gave up on this request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Refresh failed or no refresh token; the stored session has been cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    // 400 / 422
    #[error("Validation error: {message}")]
    Validation {
        status: u16,
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 404
    #[error("Not found: {0}")]
    NotFound(String),

    // Any other non-2xx status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-2xx response to an error, reading FastAPI-style `detail` bodies
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let (message, field_errors) = parse_detail(body);
        match status {
            401 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(message),
            400 | 422 => ClientError::Validation {
                status,
                message,
                field_errors,
            },
            _ => ClientError::Api { status, message },
        }
    }

    /// HTTP status behind the error, when there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) | ClientError::SessionExpired(_) => Some(401),
            ClientError::Validation { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Unauthorized(_) => "UNAUTHORIZED",
            ClientError::SessionExpired(_) => "SESSION_EXPIRED",
            ClientError::Validation { .. } => "VALIDATION_ERROR",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Queries retry these once; everything else surfaces immediately
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::SessionExpired(_))
    }

    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            ClientError::Validation { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Notification text. Validation messages come from the server verbatim;
    /// everything else gets a generic localized message.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (ClientError::Validation { message, .. }, _) => message.clone(),
            (ClientError::Unauthorized(_) | ClientError::SessionExpired(_), Locale::Es) => {
                "Tu sesión ha caducado. Inicia sesión de nuevo.".to_string()
            }
            (ClientError::Unauthorized(_) | ClientError::SessionExpired(_), Locale::En) => {
                "Your session has expired. Please log in again.".to_string()
            }
            (ClientError::NotFound(_), Locale::Es) => "El elemento solicitado no existe.".to_string(),
            (ClientError::NotFound(_), Locale::En) => "The requested item does not exist.".to_string(),
            (_, Locale::Es) => "Ha ocurrido un error. Inténtalo de nuevo.".to_string(),
            (_, Locale::En) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

fn parse_detail(body: &[u8]) -> (String, HashMap<String, String>) {
    let mut field_errors = HashMap::new();

    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            return (text, field_errors);
        }
    };

    let detail = value.get("detail").or_else(|| value.get("message"));
    let message = match detail {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Array(items)) => {
            for item in items {
                let field = item
                    .get("loc")
                    .and_then(Value::as_array)
                    .and_then(|loc| loc.iter().rev().find(|part| part.as_str() != Some("body")))
                    .map(|part| match part {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    });
                let msg = item.get("msg").and_then(Value::as_str).unwrap_or("Invalid value");
                if let Some(field) = field {
                    field_errors.insert(field, msg.to_string());
                }
            }
            items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .unwrap_or("Validation failed")
                .to_string()
        }
        Some(other) => other.to_string(),
        None => value.to_string(),
    };

    (message, field_errors)
}
