//! Multipart form decoding.
//!
//! Text parts are matched by their wire name; the `resume` part is read as
//! a file. Repeated `visaInterests` parts are joined with ", " the same way
//! the form joins its checkbox values. Unknown parts are ignored.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};

use leads_sdk::{LeadSubmission, ResumeUpload};

use crate::api::rest::error::{ApiError, ApiResult};
use crate::domain::validation::field;

/// # Errors
/// [`ApiError::Form`] when the body is not valid multipart or exceeds the
/// request body limit.
pub async fn read_submission(mut multipart: Multipart) -> ApiResult<LeadSubmission> {
    let mut submission = LeadSubmission::default();

    while let Some(part) = multipart.next_field().await.map_err(|e| form_error(&e))? {
        let Some(name) = part.name().map(str::to_owned) else {
            continue;
        };

        if name == field::RESUME {
            submission.resume = read_file(part).await?;
            continue;
        }

        let value = part.text().await.map_err(|e| form_error(&e))?;
        let slot = match name.as_str() {
            field::FIRST_NAME => &mut submission.first_name,
            field::LAST_NAME => &mut submission.last_name,
            field::EMAIL => &mut submission.email,
            field::COUNTRY => &mut submission.country,
            field::LINKEDIN => &mut submission.linkedin,
            field::LONG_FORM_INPUT => &mut submission.long_form_input,
            field::STATUS => &mut submission.status,
            field::VISA_INTERESTS => {
                append_visa_interest(&mut submission.visa_interests, &value);
                continue;
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
                continue;
            }
        };
        *slot = Some(value);
    }

    Ok(submission)
}

/// A file part without a file name is treated as "no file chosen".
async fn read_file(part: Field<'_>) -> ApiResult<Option<ResumeUpload>> {
    let file_name = part.file_name().unwrap_or_default().to_owned();
    let content_type = part.content_type().unwrap_or_default().to_owned();
    let bytes = part.bytes().await.map_err(|e| form_error(&e))?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ResumeUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn append_visa_interest(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match slot {
        Some(joined) if !joined.trim().is_empty() => {
            joined.push_str(", ");
            joined.push_str(value);
        }
        _ => *slot = Some(value.to_owned()),
    }
}

fn form_error(err: &MultipartError) -> ApiError {
    ApiError::form(err.status(), err.body_text())
}
