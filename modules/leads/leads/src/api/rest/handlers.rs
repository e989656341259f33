use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query};
use axum::{Extension, Json};
use serde_json::{Value, json};
use tracing::{field::Empty, info};

use leads_sdk::catalog::{COUNTRIES, VISA_CATEGORIES};

use crate::api::rest::dto::{
    CreateLeadResponse, FormOptionsResponse, LeadDto, LeadResponse, ListLeadsParams,
    ListLeadsResponse, UpdateLeadResponse,
};
use crate::api::rest::error::{ApiError, ApiResult, DomainResultExt, Operation};
use crate::api::rest::form::read_submission;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

fn multipart(extracted: Result<Multipart, MultipartRejection>) -> ApiResult<Multipart> {
    extracted.map_err(|rejection| ApiError::form(rejection.status(), rejection.body_text()))
}

/// Public lead submission.
#[tracing::instrument(skip(svc, body), fields(lead.id = Empty))]
pub async fn create_lead(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<CreateLeadResponse>> {
    let submission = read_submission(multipart(body)?).await?;
    let lead = svc
        .create_lead(submission)
        .await
        .during(Operation::CreateLead)?;
    tracing::Span::current().record("lead.id", lead.id.as_str());

    Ok(Json(CreateLeadResponse {
        success: true,
        lead_id: lead.id,
        message: "Lead created successfully".to_owned(),
    }))
}

/// Admin edit or status change.
#[tracing::instrument(skip(svc, body), fields(lead.id = %id))]
pub async fn update_lead(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    body: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UpdateLeadResponse>> {
    let submission = read_submission(multipart(body)?).await?;
    let lead = svc
        .update_lead(&id, submission)
        .await
        .during(Operation::UpdateLead)?;

    Ok(Json(UpdateLeadResponse {
        success: true,
        lead: LeadDto::from(lead),
        message: "Lead updated successfully".to_owned(),
    }))
}

#[tracing::instrument(skip(svc), fields(lead.id = %id))]
pub async fn get_lead(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = svc.get_lead(&id).during(Operation::GetLead)?;
    Ok(Json(LeadResponse {
        success: true,
        lead: LeadDto::from(lead),
    }))
}

#[tracing::instrument(skip(svc, params))]
pub async fn list_leads(
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<ListLeadsParams>,
) -> ApiResult<Json<ListLeadsResponse>> {
    let query = params
        .into_query(svc.limits())
        .map_err(DomainError::from)
        .during(Operation::ListLeads)?;

    info!(
        page = query.page,
        limit = query.limit,
        status = query.status.as_param(),
        sort = query.sort_field.as_str(),
        "Listing leads"
    );

    let page = svc
        .list_leads(&query)
        .during(Operation::ListLeads)?
        .map_items(LeadDto::from);

    Ok(Json(ListLeadsResponse {
        success: true,
        leads: page.items,
        pagination: page.page_info,
    }))
}

pub async fn form_options() -> Json<FormOptionsResponse> {
    Json(FormOptionsResponse {
        countries: COUNTRIES,
        visa_categories: VISA_CATEGORIES,
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
