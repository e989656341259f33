//! Domain service layer - business logic and rules.
//!
//! The service is the only writer of the lead store. Creates and updates
//! run under a single writer lock so the lookup -> merge -> write sequence
//! of one request never interleaves with another.

use std::sync::Arc;

use intake_query::{Page, Query, QueryLimits};
use leads_sdk::{Lead, LeadPatch, LeadQuery, LeadStatus, LeadSubmission, ResumeUpload};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::domain::error::DomainError;
use crate::domain::ports::{ResumeStore, StoredResume};
use crate::domain::repo::LeadsRepository;
use crate::domain::validation::{Mode, Validator};

/// Configuration for the domain service
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    pub limits: QueryLimits,
    pub max_resume_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            limits: QueryLimits::default(),
            max_resume_bytes: 5 * 1024 * 1024,
        }
    }
}

pub struct Service {
    repo: Arc<dyn LeadsRepository>,
    resumes: Arc<dyn ResumeStore>,
    validator: Validator,
    limits: QueryLimits,
    writer: Mutex<()>,
}

impl Service {
    #[must_use]
    pub fn new(
        repo: Arc<dyn LeadsRepository>,
        resumes: Arc<dyn ResumeStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            resumes,
            validator: Validator::new(config.max_resume_bytes),
            limits: config.limits,
            writer: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn limits(&self) -> QueryLimits {
        self.limits
    }

    /// # Errors
    /// [`DomainError::Validation`] when any required field is missing or
    /// malformed, [`DomainError::ResumeStore`] when the resume cannot be stored.
    pub async fn create_lead(&self, submission: LeadSubmission) -> Result<Lead, DomainError> {
        info!("Creating new lead");

        let errors = self.validator.validate(&submission, Mode::Create);
        if !errors.is_empty() {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Lead submission rejected");
            return Err(DomainError::validation(errors));
        }

        let stored = self.store_resume(submission.resume()).await?;

        let _writer = self.writer.lock().await;
        let first_name = submission.first_name.unwrap_or_default();
        let last_name = submission.last_name.unwrap_or_default();
        let lead = Lead {
            id: self.repo.next_id().to_string(),
            name: Lead::compose_name(&first_name, &last_name),
            first_name,
            last_name,
            email: submission.email.unwrap_or_default(),
            country: submission.country.unwrap_or_default(),
            linkedin: submission.linkedin,
            visa_interests: submission.visa_interests.unwrap_or_default(),
            long_form_input: submission.long_form_input.unwrap_or_default(),
            resume_url: stored.as_ref().map(|s| s.url.clone()),
            resume_file_name: stored.map(|s| s.file_name),
            status: LeadStatus::Pending,
            submitted_at: OffsetDateTime::now_utc(),
        };
        self.repo.add(lead.clone());

        info!(lead_id = %lead.id, "Successfully created lead");
        Ok(lead)
    }

    /// Merge the non-blank fields of `submission` into the stored lead.
    ///
    /// # Errors
    /// [`DomainError::LeadNotFound`] for an unknown id (the store is left
    /// untouched), [`DomainError::Validation`] for rejected fields and
    /// [`DomainError::StorageInconsistency`] when the written record cannot
    /// be read back.
    pub async fn update_lead(&self, id: &str, submission: LeadSubmission) -> Result<Lead, DomainError> {
        info!(lead_id = %id, status_only = submission.is_status_only(), "Updating lead");

        if self.repo.find_index(id).is_none() {
            return Err(DomainError::lead_not_found(id));
        }

        let errors = self.validator.validate(&submission, Mode::Update);
        if !errors.is_empty() {
            debug!(lead_id = %id, fields = ?errors.keys().collect::<Vec<_>>(), "Lead update rejected");
            return Err(DomainError::validation(errors));
        }

        let stored = self.store_resume(submission.resume()).await?;
        let patch = LeadPatch::from_submission(&submission);

        let _writer = self.writer.lock().await;
        let index = self
            .repo
            .find_index(id)
            .ok_or_else(|| DomainError::lead_not_found(id))?;
        let mut lead = self
            .repo
            .get_by_id(id)
            .ok_or_else(|| DomainError::lead_not_found(id))?;

        patch.apply_to(&mut lead);
        if let Some(stored) = stored {
            lead.resume_url = Some(stored.url);
            lead.resume_file_name = Some(stored.file_name);
        }

        self.repo.update(index, lead.clone());

        if self.repo.get_by_id(id).as_ref() != Some(&lead) {
            error!(lead_id = %id, index, "Stored lead does not match the written record");
            return Err(DomainError::storage_inconsistency(id));
        }

        info!(lead_id = %id, status = %lead.status, "Successfully updated lead");
        Ok(lead)
    }

    /// # Errors
    /// [`DomainError::LeadNotFound`] for an unknown id.
    pub fn get_lead(&self, id: &str) -> Result<Lead, DomainError> {
        debug!(lead_id = %id, "Getting lead by id");
        self.repo
            .get_by_id(id)
            .ok_or_else(|| DomainError::lead_not_found(id))
    }

    /// Filter, search, sort and paginate the current snapshot.
    ///
    /// # Errors
    /// [`DomainError::InvalidQuery`] when the page or limit is out of bounds.
    pub fn list_leads(&self, query: &LeadQuery) -> Result<Page<Lead>, DomainError> {
        let request = self.limits.page_request(Some(query.page), Some(query.limit))?;

        let page = Query::new(self.repo.all())
            .filter_by_status(&query.status)
            .search(&query.search)
            .sort(query.sort_field, query.sort_dir)
            .paginate(request);

        debug!(
            total = page.page_info.total,
            returned = page.items.len(),
            "Listed leads"
        );
        Ok(page)
    }

    async fn store_resume(&self, upload: Option<&ResumeUpload>) -> Result<Option<StoredResume>, DomainError> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        match self.resumes.store(upload).await {
            Ok(stored) => {
                debug!(url = %stored.url, bytes = upload.size(), "Stored resume");
                Ok(Some(stored))
            }
            Err(e) => {
                error!(error = %e, file_name = %upload.file_name, "Failed to store resume");
                Err(DomainError::resume_store(e.to_string()))
            }
        }
    }
}
