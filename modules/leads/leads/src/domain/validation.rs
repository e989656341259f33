//! Field rules shared by create and update.
//!
//! Create requires every content field. Update checks only the fields that
//! were sent with a non-blank value. A status-only update skips the content
//! rules entirely; the status value itself is always checked.

use std::sync::LazyLock;

use leads_sdk::{FieldErrors, LeadStatus, LeadSubmission, ResumeUpload, non_blank};
use regex::Regex;
use url::Url;

/// Wire names of the submitted fields; also the keys of [`FieldErrors`].
pub mod field {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const COUNTRY: &str = "country";
    pub const LINKEDIN: &str = "linkedin";
    pub const VISA_INTERESTS: &str = "visaInterests";
    pub const LONG_FORM_INPUT: &str = "longFormInput";
    pub const RESUME: &str = "resume";
    pub const STATUS: &str = "status";
}

pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const COUNTRY_REQUIRED: &str = "Country of Citizenship is required";
pub const LINKEDIN_REQUIRED: &str = "LinkedIn / Personal Website URL is required";
pub const URL_SCHEME_REQUIRED: &str = "Please enter a valid URL starting with http:// or https://";
pub const URL_INVALID: &str = "Please enter a valid URL";
pub const URL_DOMAIN_REQUIRED: &str =
    "Please enter a valid URL with a proper domain (e.g., example.com)";
pub const VISA_INTERESTS_REQUIRED: &str = "Please select at least one visa type";
pub const LONG_FORM_INPUT_REQUIRED: &str = "Please provide details about how we can help you";
pub const RESUME_REQUIRED: &str = "Resume / CV is required";
pub const RESUME_TYPE_INVALID: &str = "Please upload a PDF, DOC, or DOCX file";
pub const STATUS_INVALID: &str = "Status must be PENDING or REACHED_OUT";

pub const ALLOWED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic"));

type FieldRule = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy)]
pub struct Validator {
    max_resume_bytes: usize,
}

impl Validator {
    #[must_use]
    pub fn new(max_resume_bytes: usize) -> Self {
        Self { max_resume_bytes }
    }

    /// Validate a submission. An empty map means it is acceptable.
    #[must_use]
    pub fn validate(&self, submission: &LeadSubmission, mode: Mode) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if mode == Mode::Update
            && let Some(status) = non_blank(submission.status.as_ref())
            && status.parse::<LeadStatus>().is_err()
        {
            errors.insert(field::STATUS.to_owned(), STATUS_INVALID.to_owned());
        }

        if mode == Mode::Update && submission.is_status_only() {
            return errors;
        }

        let fields: [(&str, Option<&String>, FieldRule, &str); 7] = [
            (field::FIRST_NAME, submission.first_name.as_ref(), accept, FIRST_NAME_REQUIRED),
            (field::LAST_NAME, submission.last_name.as_ref(), accept, LAST_NAME_REQUIRED),
            (field::EMAIL, submission.email.as_ref(), validate_email, EMAIL_REQUIRED),
            (field::COUNTRY, submission.country.as_ref(), accept, COUNTRY_REQUIRED),
            (field::LINKEDIN, submission.linkedin.as_ref(), validate_url, LINKEDIN_REQUIRED),
            (
                field::VISA_INTERESTS,
                submission.visa_interests.as_ref(),
                validate_visa_interests,
                VISA_INTERESTS_REQUIRED,
            ),
            (
                field::LONG_FORM_INPUT,
                submission.long_form_input.as_ref(),
                accept,
                LONG_FORM_INPUT_REQUIRED,
            ),
        ];

        for (name, value, rule, required) in fields {
            let outcome = match non_blank(value) {
                Some(value) => rule(value),
                None if mode == Mode::Create => Err(required.to_owned()),
                None => Ok(()),
            };
            if let Err(message) = outcome {
                errors.insert(name.to_owned(), message);
            }
        }

        match submission.resume() {
            Some(upload) => {
                if let Err(message) = self.validate_resume(upload) {
                    errors.insert(field::RESUME.to_owned(), message);
                }
            }
            None if mode == Mode::Create => {
                errors.insert(field::RESUME.to_owned(), RESUME_REQUIRED.to_owned());
            }
            None => {}
        }

        errors
    }

    /// # Errors
    /// Returns the user-facing message for a disallowed type or an oversized file.
    pub fn validate_resume(&self, upload: &ResumeUpload) -> Result<(), String> {
        if !ALLOWED_RESUME_TYPES.contains(&upload.content_type.as_str()) {
            return Err(RESUME_TYPE_INVALID.to_owned());
        }
        if upload.size() > self.max_resume_bytes {
            let megabytes = self.max_resume_bytes / (1024 * 1024);
            return Err(format!("File size must be less than {megabytes}MB"));
        }
        Ok(())
    }
}

#[allow(clippy::unnecessary_wraps)]
fn accept(_: &str) -> Result<(), String> {
    Ok(())
}

fn validate_email(value: &str) -> Result<(), String> {
    if EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(EMAIL_INVALID.to_owned())
    }
}

fn validate_visa_interests(value: &str) -> Result<(), String> {
    if value.split(',').any(|tag| !tag.trim().is_empty()) {
        Ok(())
    } else {
        Err(VISA_INTERESTS_REQUIRED.to_owned())
    }
}

/// Explicit http(s) scheme, parses, and names a dotted host or `localhost`.
///
/// # Errors
/// Returns the user-facing message describing the first failed check.
pub fn validate_url(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if !trimmed.starts_with("https://") && !trimmed.starts_with("http://") {
        return Err(URL_SCHEME_REQUIRED.to_owned());
    }
    if trimmed == "https://" || trimmed == "http://" {
        return Err(URL_INVALID.to_owned());
    }

    let url = Url::parse(trimmed).map_err(|_| URL_INVALID.to_owned())?;
    let Some(host) = url.host_str() else {
        return Err(URL_INVALID.to_owned());
    };
    if host == "localhost" || host.contains('.') {
        Ok(())
    } else {
        Err(URL_DOMAIN_REQUIRED.to_owned())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const MAX: usize = 5 * 1024 * 1024;

    fn pdf(size: usize) -> ResumeUpload {
        ResumeUpload {
            file_name: "cv.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            bytes: vec![0; size],
        }
    }

    fn complete() -> LeadSubmission {
        LeadSubmission {
            first_name: Some("Jane".to_owned()),
            last_name: Some("Doe".to_owned()),
            email: Some("jane@example.com".to_owned()),
            country: Some("Canada".to_owned()),
            linkedin: Some("https://linkedin.com/in/jane".to_owned()),
            visa_interests: Some("O-1".to_owned()),
            long_form_input: Some("Please help".to_owned()),
            resume: Some(pdf(1024)),
            status: None,
        }
    }

    fn validator() -> Validator {
        Validator::new(MAX)
    }

    #[test]
    fn complete_submission_is_valid_on_create() {
        assert!(validator().validate(&complete(), Mode::Create).is_empty());
    }

    #[test]
    fn empty_submission_reports_every_required_field() {
        let errors = validator().validate(&LeadSubmission::default(), Mode::Create);
        assert_eq!(errors.len(), 8);
        assert_eq!(errors[field::FIRST_NAME], FIRST_NAME_REQUIRED);
        assert_eq!(errors[field::LAST_NAME], LAST_NAME_REQUIRED);
        assert_eq!(errors[field::EMAIL], EMAIL_REQUIRED);
        assert_eq!(errors[field::COUNTRY], COUNTRY_REQUIRED);
        assert_eq!(errors[field::LINKEDIN], LINKEDIN_REQUIRED);
        assert_eq!(errors[field::VISA_INTERESTS], VISA_INTERESTS_REQUIRED);
        assert_eq!(errors[field::LONG_FORM_INPUT], LONG_FORM_INPUT_REQUIRED);
        assert_eq!(errors[field::RESUME], RESUME_REQUIRED);
    }

    #[test]
    fn blank_values_count_as_missing_on_create() {
        let mut submission = complete();
        submission.first_name = Some("   ".to_owned());
        submission.resume = Some(pdf(0));
        let errors = validator().validate(&submission, Mode::Create);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[field::FIRST_NAME], FIRST_NAME_REQUIRED);
        assert_eq!(errors[field::RESUME], RESUME_REQUIRED);
    }

    #[test]
    fn update_checks_only_supplied_fields() {
        let submission = LeadSubmission {
            email: Some("not-an-email".to_owned()),
            first_name: Some(String::new()),
            ..LeadSubmission::default()
        };
        let errors = validator().validate(&submission, Mode::Update);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[field::EMAIL], EMAIL_INVALID);
    }

    #[test]
    fn status_only_update_skips_content_rules() {
        let submission = LeadSubmission::status_only(LeadStatus::ReachedOut);
        assert!(validator().validate(&submission, Mode::Update).is_empty());
    }

    #[test]
    fn status_with_linkedin_still_validates_the_url() {
        let submission = LeadSubmission {
            linkedin: Some("not a url".to_owned()),
            ..LeadSubmission::status_only(LeadStatus::ReachedOut)
        };
        assert!(!submission.is_status_only());

        let errors = validator().validate(&submission, Mode::Update);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(field::LINKEDIN));
    }

    #[test]
    fn unknown_status_is_a_field_error() {
        let submission = LeadSubmission {
            status: Some("DONE".to_owned()),
            ..LeadSubmission::default()
        };
        let errors = validator().validate(&submission, Mode::Update);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[field::STATUS], STATUS_INVALID);
    }

    #[test]
    fn create_ignores_status_field() {
        let mut submission = complete();
        submission.status = Some("DONE".to_owned());
        assert!(validator().validate(&submission, Mode::Create).is_empty());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("a b@c.d").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@b.co").is_err());
    }

    #[test]
    fn url_rules() {
        assert!(validate_url("https://linkedin.com/in/jane").is_ok());
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("  https://example.com  ").is_ok());
        assert_eq!(validate_url("linkedin.com/in/jane"), Err(URL_SCHEME_REQUIRED.to_owned()));
        assert_eq!(validate_url("ftp://example.com"), Err(URL_SCHEME_REQUIRED.to_owned()));
        assert_eq!(validate_url("https://"), Err(URL_INVALID.to_owned()));
        assert_eq!(validate_url("http://exa mple.com"), Err(URL_INVALID.to_owned()));
        assert_eq!(validate_url("https://linkedin"), Err(URL_DOMAIN_REQUIRED.to_owned()));
        assert_eq!(validate_url("https://intranet42"), Err(URL_DOMAIN_REQUIRED.to_owned()));
    }

    #[test]
    fn visa_interests_need_one_non_blank_tag() {
        assert!(validate_visa_interests("O-1, EB-1A").is_ok());
        assert!(validate_visa_interests(" , ,").is_err());
    }

    #[test]
    fn resume_type_and_size() {
        let v = validator();
        assert!(v.validate_resume(&pdf(MAX)).is_ok());
        assert_eq!(
            v.validate_resume(&pdf(MAX + 1)),
            Err("File size must be less than 5MB".to_owned())
        );

        let mut text = pdf(10);
        text.content_type = "text/plain".to_owned();
        assert_eq!(v.validate_resume(&text), Err(RESUME_TYPE_INVALID.to_owned()));

        for content_type in ALLOWED_RESUME_TYPES {
            let mut upload = pdf(10);
            upload.content_type = (*content_type).to_owned();
            assert!(v.validate_resume(&upload).is_ok());
        }
    }

    #[test]
    fn update_with_new_resume_validates_it() {
        let mut upload = pdf(10);
        upload.content_type = "image/png".to_owned();
        let submission = LeadSubmission {
            resume: Some(upload),
            ..LeadSubmission::default()
        };
        let errors = validator().validate(&submission, Mode::Update);
        assert_eq!(errors[field::RESUME], RESUME_TYPE_INVALID);
    }
}
