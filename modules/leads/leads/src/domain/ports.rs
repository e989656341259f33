use async_trait::async_trait;
use leads_sdk::ResumeUpload;

/// Where a stored resume can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub url: String,
    pub file_name: String,
}

/// Output port: blob storage for uploaded resumes.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn store(&self, upload: &ResumeUpload) -> anyhow::Result<StoredResume>;
}

/// Output port: admin credential check and session bookkeeping.
///
/// The leads core never inspects credentials itself; the REST layer asks
/// this provider and only forwards the outcome.
pub trait SessionProvider: Send + Sync {
    /// Returns a new session token when the credentials are accepted.
    fn login(&self, username: &str, password: &str) -> Option<String>;

    fn is_valid(&self, token: &str) -> bool;

    fn logout(&self, token: &str);
}
