use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use intake_query::{PageInfo, QueryError, QueryLimits, StatusFilter};
use leads_sdk::{Lead, LeadQuery, LeadSortField, SortDir};

/// REST DTO for lead representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub email: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub visa_interests: String,
    pub long_form_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

impl From<Lead> for LeadDto {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            first_name: lead.first_name,
            last_name: lead.last_name,
            name: lead.name,
            email: lead.email,
            country: lead.country,
            linkedin: lead.linkedin,
            visa_interests: lead.visa_interests,
            long_form_input: lead.long_form_input,
            resume_url: lead.resume_url,
            resume_file_name: lead.resume_file_name,
            status: lead.status.as_str().to_owned(),
            submitted_at: lead.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadResponse {
    pub success: bool,
    pub lead_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeadResponse {
    pub success: bool,
    pub lead: LeadDto,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadResponse {
    pub success: bool,
    pub lead: LeadDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLeadsResponse {
    pub success: bool,
    pub leads: Vec<LeadDto>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptionsResponse {
    pub countries: &'static [&'static str],
    pub visa_categories: &'static [&'static str],
}

/// Raw list parameters; everything arrives as text and is parsed in
/// [`ListLeadsParams::into_query`] so bad values become a 400 envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLeadsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

impl ListLeadsParams {
    /// Missing values fall back to page 1, the default page size and
    /// newest-first ordering. Range checks happen in the service.
    ///
    /// # Errors
    /// [`QueryError`] for non-numeric paging values or an unknown sort field
    /// or direction.
    pub fn into_query(self, limits: QueryLimits) -> Result<LeadQuery, QueryError> {
        let page = QueryLimits::parse_param("page", self.page.as_deref())?.unwrap_or(1);
        let limit = QueryLimits::parse_param("limit", self.limit.as_deref())?
            .unwrap_or(limits.default_limit);

        let sort_field = match non_empty(self.sort_field.as_deref()) {
            Some(raw) => raw.parse::<LeadSortField>()?,
            None => LeadSortField::default(),
        };
        let sort_dir = match non_empty(self.sort_direction.as_deref()) {
            Some(raw) => raw.parse::<SortDir>()?,
            None => SortDir::default(),
        };

        Ok(LeadQuery {
            page,
            limit,
            status: StatusFilter::from_param(self.status.as_deref()),
            search: self.search.unwrap_or_default(),
            sort_field,
            sort_dir,
        })
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    /// The signed-in username.
    pub user: String,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use leads_sdk::LeadStatus;
    use time::macros::datetime;

    #[test]
    fn lead_dto_uses_camel_case_and_rfc3339() {
        let lead = Lead {
            id: "3".to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            country: "Canada".to_owned(),
            linkedin: None,
            visa_interests: "O-1".to_owned(),
            long_form_input: "help".to_owned(),
            resume_url: Some("/uploads/1-cv.pdf".to_owned()),
            resume_file_name: Some("cv.pdf".to_owned()),
            status: LeadStatus::ReachedOut,
            submitted_at: datetime!(2024-03-01 10:30 UTC),
        };

        let json = serde_json::to_value(LeadDto::from(lead)).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["resumeFileName"], "cv.pdf");
        assert_eq!(json["status"], "REACHED_OUT");
        assert_eq!(json["submittedAt"], "2024-03-01T10:30:00Z");
        assert!(json.get("linkedin").is_none());
    }

    #[test]
    fn empty_params_give_the_landing_view() {
        let query = ListLeadsParams::default()
            .into_query(QueryLimits::default())
            .unwrap();
        assert_eq!(query, LeadQuery::default());
    }

    #[test]
    fn params_are_parsed() {
        let params = ListLeadsParams {
            page: Some("2".to_owned()),
            limit: Some("8".to_owned()),
            status: Some("PENDING".to_owned()),
            search: Some("jane".to_owned()),
            sort_field: Some("name".to_owned()),
            sort_direction: Some("asc".to_owned()),
        };
        let query = params.into_query(QueryLimits::default()).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 8);
        assert_eq!(query.status, StatusFilter::Only("PENDING".to_owned()));
        assert_eq!(query.sort_field, LeadSortField::Name);
        assert_eq!(query.sort_dir, SortDir::Asc);
    }

    #[test]
    fn bad_params_are_query_errors() {
        let bad_page = ListLeadsParams {
            page: Some("two".to_owned()),
            ..ListLeadsParams::default()
        };
        assert!(matches!(
            bad_page.into_query(QueryLimits::default()),
            Err(QueryError::InvalidNumber { param: "page", .. })
        ));

        let bad_sort = ListLeadsParams {
            sort_field: Some("email".to_owned()),
            ..ListLeadsParams::default()
        };
        assert!(matches!(
            bad_sort.into_query(QueryLimits::default()),
            Err(QueryError::UnknownSortField(_))
        ));

        let bad_dir = ListLeadsParams {
            sort_direction: Some("sideways".to_owned()),
            ..ListLeadsParams::default()
        };
        assert!(matches!(
            bad_dir.into_query(QueryLimits::default()),
            Err(QueryError::InvalidSortDirection(_))
        ));
    }
}
