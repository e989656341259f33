use intake_query::QueryError;
use leads_sdk::{FieldErrors, LeadsError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", format_fields(.errors))]
    Validation { errors: FieldErrors },

    #[error("Lead not found: {id}")]
    LeadNotFound { id: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// The record read back after a write differs from what was written.
    #[error("Storage inconsistency for lead {id}")]
    StorageInconsistency { id: String },

    #[error("Resume storage failed: {message}")]
    ResumeStore { message: String },
}

fn format_fields(errors: &FieldErrors) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl DomainError {
    #[must_use]
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    pub fn lead_not_found(id: impl Into<String>) -> Self {
        Self::LeadNotFound { id: id.into() }
    }

    pub fn storage_inconsistency(id: impl Into<String>) -> Self {
        Self::StorageInconsistency { id: id.into() }
    }

    pub fn resume_store(message: impl Into<String>) -> Self {
        Self::ResumeStore {
            message: message.into(),
        }
    }

    /// Failures that are the server's fault rather than the caller's.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::StorageInconsistency { .. } | Self::ResumeStore { .. }
        )
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for LeadsError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::Validation { errors } => LeadsError::validation(errors),
            DomainError::LeadNotFound { id } => LeadsError::not_found(id),
            DomainError::InvalidQuery(err) => LeadsError::invalid_query(err.to_string()),
            DomainError::StorageInconsistency { .. } | DomainError::ResumeStore { .. } => {
                LeadsError::internal()
            }
        }
    }
}
