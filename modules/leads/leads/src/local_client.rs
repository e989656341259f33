//! Local implementation of `LeadsClient`.
//!
//! Used in-process (admin tooling, the view cache in tests). It delegates
//! to the domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;

use leads_sdk::{Lead, LeadQuery, LeadSubmission, LeadsClient, LeadsError, Page};

use crate::domain::service::Service;

pub struct LeadsLocalClient {
    service: Arc<Service>,
}

impl LeadsLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl LeadsClient for LeadsLocalClient {
    async fn create_lead(&self, submission: LeadSubmission) -> Result<Lead, LeadsError> {
        self.service.create_lead(submission).await.map_err(Into::into)
    }

    async fn update_lead(&self, id: &str, submission: LeadSubmission) -> Result<Lead, LeadsError> {
        self.service
            .update_lead(id, submission)
            .await
            .map_err(Into::into)
    }

    async fn get_lead(&self, id: &str) -> Result<Lead, LeadsError> {
        self.service.get_lead(id).map_err(Into::into)
    }

    async fn list_leads(&self, query: &LeadQuery) -> Result<Page<Lead>, LeadsError> {
        self.service.list_leads(query).map_err(Into::into)
    }
}
