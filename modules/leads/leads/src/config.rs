use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use intake_query::QueryLimits;

/// Configuration for the `leads` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeadsConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Largest accepted resume, inclusive.
    #[serde(default = "default_max_resume_bytes")]
    pub max_resume_bytes: usize,
    /// Request body cap for the multipart endpoints. Must leave room above
    /// `max_resume_bytes` so oversized resumes reach validation.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    /// Prefix of the URLs handed out for stored resumes.
    #[serde(default = "default_upload_base_path")]
    pub upload_base_path: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_resume_bytes: default_max_resume_bytes(),
            body_limit_bytes: default_body_limit_bytes(),
            upload_base_path: default_upload_base_path(),
            auth: AuthConfig::default(),
        }
    }
}

impl LeadsConfig {
    #[must_use]
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits::new()
            .with_default_limit(self.default_page_size)
            .with_max_limit(self.max_page_size)
    }

    /// # Errors
    /// Returns a description of the first inconsistent setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_page_size == 0 {
            return Err("leads.max_page_size must be at least 1".to_owned());
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(format!(
                "leads.default_page_size must be between 1 and {}",
                self.max_page_size
            ));
        }
        if self.body_limit_bytes <= self.max_resume_bytes {
            return Err("leads.body_limit_bytes must be larger than leads.max_resume_bytes".to_owned());
        }
        if self.auth.enabled && self.auth.username.trim().is_empty() {
            return Err("leads.auth.username must not be empty when auth is enabled".to_owned());
        }
        Ok(())
    }
}

/// Admin session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// When false the admin routes are served without a session check.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password", serialize_with = "redact")]
    pub password: SecretString,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Adds `Secure` to the session cookie.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: default_username(),
            password: default_password(),
            session_ttl_secs: default_session_ttl_secs(),
            secure_cookie: false,
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

fn redact<S: Serializer>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("[REDACTED]")
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_max_resume_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_upload_base_path() -> String {
    "/uploads".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_username() -> String {
    "admin".to_owned()
}

fn default_password() -> SecretString {
    SecretString::from("password123".to_owned())
}

fn default_session_ttl_secs() -> u64 {
    60 * 60 * 24
}
