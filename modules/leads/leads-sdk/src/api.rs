//! `LeadsClient` trait definition.
//!
//! Implemented in-process by the leads module and consumed by the admin
//! view cache. Any transport can implement it as long as it maps failures
//! onto [`LeadsError`].

use async_trait::async_trait;
use intake_query::Page;

use crate::errors::LeadsError;
use crate::models::{Lead, LeadQuery, LeadStatus, LeadSubmission};

#[async_trait]
pub trait LeadsClient: Send + Sync {
    /// Validate and store a new lead. The result is always `PENDING`.
    async fn create_lead(&self, submission: LeadSubmission) -> Result<Lead, LeadsError>;

    /// Merge the non-blank fields of `submission` into an existing lead.
    async fn update_lead(&self, id: &str, submission: LeadSubmission) -> Result<Lead, LeadsError>;

    async fn get_lead(&self, id: &str) -> Result<Lead, LeadsError>;

    async fn list_leads(&self, query: &LeadQuery) -> Result<Page<Lead>, LeadsError>;

    /// Change only the status; content and resume fields are left untouched.
    async fn update_status(&self, id: &str, status: LeadStatus) -> Result<Lead, LeadsError> {
        self.update_lead(id, LeadSubmission::status_only(status)).await
    }
}
