//! Public models for the leads module.
//!
//! These are transport-agnostic data structures shared by the server, the
//! in-process client and the admin view cache. REST DTOs live in the server
//! crate and convert from these.

use std::fmt;
use std::str::FromStr;

use intake_query::{HasStatus, QueryError, Searchable, SortDir, SortKey, Sortable, StatusFilter};
use thiserror::Error;
use time::OffsetDateTime;

/// Lifecycle state of a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    #[default]
    Pending,
    ReachedOut,
}

impl LeadStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::Pending => "PENDING",
            LeadStatus::ReachedOut => "REACHED_OUT",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lead status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(LeadStatus::Pending),
            "REACHED_OUT" => Ok(LeadStatus::ReachedOut),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// A submitted immigration-assessment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Always `compose_name(first_name, last_name)` after any write.
    pub name: String,
    pub email: String,
    pub country: String,
    pub linkedin: Option<String>,
    /// Comma-joined visa categories.
    pub visa_interests: String,
    pub long_form_input: String,
    pub resume_url: Option<String>,
    pub resume_file_name: Option<String>,
    pub status: LeadStatus,
    pub submitted_at: OffsetDateTime,
}

impl Lead {
    #[must_use]
    pub fn compose_name(first_name: &str, last_name: &str) -> String {
        format!("{first_name} {last_name}").trim().to_owned()
    }
}

/// An uploaded resume as received from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw field set submitted for create or update.
///
/// Every field is optional; blank strings are treated the same as absent
/// ones. `status` stays a raw string so an unknown value can be reported as
/// a field error instead of failing at the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub linkedin: Option<String>,
    pub visa_interests: Option<String>,
    pub long_form_input: Option<String>,
    pub resume: Option<ResumeUpload>,
    pub status: Option<String>,
}

/// Returns the value when it holds something other than whitespace.
#[must_use]
pub fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl LeadSubmission {
    /// A submission that only changes the status.
    #[must_use]
    pub fn status_only(status: LeadStatus) -> Self {
        Self {
            status: Some(status.as_str().to_owned()),
            ..Self::default()
        }
    }

    /// A resume counts as supplied only when it carries bytes.
    #[must_use]
    pub fn resume(&self) -> Option<&ResumeUpload> {
        self.resume.as_ref().filter(|r| !r.is_empty())
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.country,
            &self.linkedin,
            &self.visa_interests,
            &self.long_form_input,
        ]
        .into_iter()
        .any(|field| non_blank(field.as_ref()).is_some())
            || self.resume().is_some()
    }

    /// Status supplied and every content field absent.
    ///
    /// `linkedin` counts as content here, so a status change sent together
    /// with a profile URL still has that URL validated.
    #[must_use]
    pub fn is_status_only(&self) -> bool {
        non_blank(self.status.as_ref()).is_some() && !self.has_content()
    }
}

/// Field-level changes to apply on top of an existing lead.
///
/// Resume changes are not part of the patch: they need a stored URL which
/// only the server can produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub linkedin: Option<String>,
    pub visa_interests: Option<String>,
    pub long_form_input: Option<String>,
    pub status: Option<LeadStatus>,
}

impl LeadPatch {
    #[must_use]
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Keep the non-blank fields of a submission. An unparsable status is
    /// dropped; validation reports it separately.
    #[must_use]
    pub fn from_submission(submission: &LeadSubmission) -> Self {
        let keep = |field: &Option<String>| non_blank(field.as_ref()).map(str::to_owned);
        Self {
            first_name: keep(&submission.first_name),
            last_name: keep(&submission.last_name),
            email: keep(&submission.email),
            country: keep(&submission.country),
            linkedin: keep(&submission.linkedin),
            visa_interests: keep(&submission.visa_interests),
            long_form_input: keep(&submission.long_form_input),
            status: non_blank(submission.status.as_ref()).and_then(|s| s.parse().ok()),
        }
    }

    /// Merge into `lead`. `name` is recomputed from the merged first and last
    /// names whenever either one changes. `id` and `submitted_at` are never
    /// touched.
    pub fn apply_to(&self, lead: &mut Lead) {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        set(&mut lead.first_name, self.first_name.as_ref());
        set(&mut lead.last_name, self.last_name.as_ref());
        if self.first_name.is_some() || self.last_name.is_some() {
            lead.name = Lead::compose_name(&lead.first_name, &lead.last_name);
        }
        set(&mut lead.email, self.email.as_ref());
        set(&mut lead.country, self.country.as_ref());
        if let Some(linkedin) = &self.linkedin {
            lead.linkedin = Some(linkedin.clone());
        }
        set(&mut lead.visa_interests, self.visa_interests.as_ref());
        set(&mut lead.long_form_input, self.long_form_input.as_ref());
        if let Some(status) = self.status {
            lead.status = status;
        }
    }

    /// Whether applying this patch can change the lead's position under `field`.
    #[must_use]
    pub fn touches(&self, field: LeadSortField) -> bool {
        match field {
            LeadSortField::Name => self.first_name.is_some() || self.last_name.is_some(),
            LeadSortField::SubmittedAt => false,
            LeadSortField::Status => self.status.is_some(),
            LeadSortField::Country => self.country.is_some(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields scanned by free-text search, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSearchField {
    Name,
    Email,
    Country,
    VisaInterests,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeadSortField {
    Name,
    #[default]
    SubmittedAt,
    Status,
    Country,
}

impl LeadSortField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeadSortField::Name => "name",
            LeadSortField::SubmittedAt => "submittedAt",
            LeadSortField::Status => "status",
            LeadSortField::Country => "country",
        }
    }
}

impl FromStr for LeadSortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(LeadSortField::Name),
            "submittedAt" => Ok(LeadSortField::SubmittedAt),
            "status" => Ok(LeadSortField::Status),
            "country" => Ok(LeadSortField::Country),
            other => Err(QueryError::UnknownSortField(other.to_owned())),
        }
    }
}

/// One admin list view: pagination, filter, search and ordering.
///
/// Also used as the cache key of the admin view cache, so equal queries
/// always address the same cached page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeadQuery {
    pub page: u64,
    pub limit: u64,
    pub status: StatusFilter,
    pub search: String,
    pub sort_field: LeadSortField,
    pub sort_dir: SortDir,
}

impl Default for LeadQuery {
    /// The dashboard's landing view: newest first, ten per page.
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: StatusFilter::All,
            search: String::new(),
            sort_field: LeadSortField::SubmittedAt,
            sort_dir: SortDir::Desc,
        }
    }
}

impl LeadQuery {
    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: LeadSortField, dir: SortDir) -> Self {
        self.sort_field = field;
        self.sort_dir = dir;
        self
    }
}

impl HasStatus for Lead {
    fn status(&self) -> &str {
        self.status.as_str()
    }
}

impl Searchable for Lead {
    type Field = LeadSearchField;
    const SEARCH_FIELDS: &'static [LeadSearchField] = &[
        LeadSearchField::Name,
        LeadSearchField::Email,
        LeadSearchField::Country,
        LeadSearchField::VisaInterests,
    ];

    fn text(&self, field: LeadSearchField) -> Option<&str> {
        Some(match field {
            LeadSearchField::Name => &self.name,
            LeadSearchField::Email => &self.email,
            LeadSearchField::Country => &self.country,
            LeadSearchField::VisaInterests => &self.visa_interests,
        })
    }
}

impl Sortable for Lead {
    type SortField = LeadSortField;

    fn sort_key(&self, field: LeadSortField) -> SortKey<'_> {
        match field {
            LeadSortField::Name => SortKey::Text(&self.name),
            LeadSortField::SubmittedAt => SortKey::Instant(self.submitted_at),
            LeadSortField::Status => SortKey::Text(self.status.as_str()),
            LeadSortField::Country => SortKey::Text(&self.country),
        }
    }
}
