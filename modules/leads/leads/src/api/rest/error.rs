use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::domain::error::DomainError;

/// The endpoint a failure happened in; selects the generic failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateLead,
    UpdateLead,
    GetLead,
    ListLeads,
}

impl Operation {
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateLead => "Failed to create lead",
            Operation::UpdateLead => "Failed to update lead",
            Operation::GetLead => "Failed to fetch lead",
            Operation::ListLeads => "Failed to fetch leads",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateLead => "create_lead",
            Operation::UpdateLead => "update_lead",
            Operation::GetLead => "get_lead",
            Operation::ListLeads => "list_leads",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation} failed: {source}")]
    Domain {
        operation: Operation,
        #[source]
        source: DomainError,
    },

    /// The multipart body could not be decoded.
    #[error("Malformed form data: {message}")]
    Form { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    #[must_use]
    pub fn form(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Form {
            status,
            message: message.into(),
        }
    }
}

/// Tag a domain result with the endpoint it came from.
pub trait DomainResultExt<T> {
    /// # Errors
    /// Wraps the domain error into [`ApiError::Domain`].
    fn during(self, operation: Operation) -> ApiResult<T>;
}

impl<T> DomainResultExt<T> for Result<T, DomainError> {
    fn during(self, operation: Operation) -> ApiResult<T> {
        self.map_err(|source| ApiError::Domain { operation, source })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain { operation, source } => domain_response(operation, source),
            ApiError::Form { status, message } => {
                tracing::warn!(status = status.as_u16(), error = %message, "Rejected form data");
                let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Upload is too large"
                } else {
                    "Invalid form data"
                };
                (status, Json(json!({ "success": false, "error": error }))).into_response()
            }
        }
    }
}

fn domain_response(operation: Operation, error: DomainError) -> Response {
    match error {
        DomainError::Validation { errors } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "errors": errors })),
        )
            .into_response(),
        DomainError::LeadNotFound { id } => {
            tracing::debug!(lead_id = %id, %operation, "Lead not found");
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Lead not found" })),
            )
                .into_response()
        }
        DomainError::InvalidQuery(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": err.to_string() })),
        )
            .into_response(),
        err @ (DomainError::StorageInconsistency { .. } | DomainError::ResumeStore { .. }) => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = %err, %operation, "Request failed");
            let body = if operation == Operation::CreateLead {
                json!({ "success": false, "error": operation.failure_message() })
            } else {
                json!({ "error": operation.failure_message() })
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
