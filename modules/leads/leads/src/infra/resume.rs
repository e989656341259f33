use async_trait::async_trait;
use time::OffsetDateTime;

use leads_sdk::ResumeUpload;

use crate::domain::ports::{ResumeStore, StoredResume};

/// Assigns each upload a timestamped URL under a fixed base path.
///
/// The bytes themselves are not persisted; only the name and URL travel
/// with the lead record.
pub struct NamingResumeStore {
    base_path: String,
}

impl NamingResumeStore {
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into().trim_end_matches('/').to_owned();
        Self { base_path }
    }
}

#[async_trait]
impl ResumeStore for NamingResumeStore {
    async fn store(&self, upload: &ResumeUpload) -> anyhow::Result<StoredResume> {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let safe_name: String = upload
            .file_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        if safe_name.trim().is_empty() {
            anyhow::bail!("resume has no file name");
        }
        Ok(StoredResume {
            url: format!("{}/{millis}-{safe_name}", self.base_path),
            file_name: upload.file_name.clone(),
        })
    }
}
