//! Public error types for the leads module.
//!
//! These errors are safe to expose to other modules and to the admin
//! dashboard. Internal causes are logged server-side and never carried here.

use std::collections::BTreeMap;

use thiserror::Error;

/// Message shown when nothing more specific can be said.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Field name -> message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors that can be returned by a `LeadsClient`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeadsError {
    /// One or more submitted fields were rejected.
    #[error("Validation failed for {} field(s)", errors.len())]
    Validation { errors: FieldErrors },

    /// Lead with the specified ID was not found.
    #[error("Lead not found: {id}")]
    NotFound { id: String },

    /// List parameters could not be interpreted.
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// The caller has no valid admin session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Another command for the same lead has not finished yet.
    #[error("An update for lead {id} is already in progress")]
    CommandInFlight { id: String },

    /// The request never produced a usable response.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl LeadsError {
    #[must_use]
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    pub fn command_in_flight(id: impl Into<String>) -> Self {
        Self::CommandInFlight { id: id.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }

    /// Per-field messages, when the failure carries them.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// A message the dashboard can show as-is: the field messages when
    /// present, otherwise one actionable sentence.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { errors } if !errors.is_empty() => {
                errors.values().cloned().collect::<Vec<_>>().join("; ")
            }
            Self::NotFound { .. } => "Lead not found".to_owned(),
            Self::InvalidQuery { message } => message.clone(),
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_owned(),
            Self::CommandInFlight { .. } => {
                "This lead is still being updated. Please wait a moment.".to_owned()
            }
            Self::Validation { .. } | Self::Transport { .. } | Self::Internal => {
                GENERIC_FAILURE_MESSAGE.to_owned()
            }
        }
    }
}
