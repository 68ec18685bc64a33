//! Permit read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use permit_core::types::{PermitId, PermitTypeId, PrincipalId};

use super::family::PermitFamily;
use super::status::PermitStatus;

/// A permit type offered by the municipality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct PermitType {
    /// Unique permit type identifier.
    pub id: PermitTypeId,
    /// Display title, e.g. "Business Permit".
    pub title: String,
    /// URL-style slug, e.g. "business-permit-renewal".
    pub slug: String,
}

impl PermitType {
    /// Resolve the document family for this type.
    pub fn family(&self) -> PermitFamily {
        PermitFamily::from_slug(&self.slug)
    }
}

/// Applicant name as joined from the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantName {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

impl ApplicantName {
    /// `first last`, trimmed. Empty when both parts are absent or blank.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Summary permit record as listed for staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    /// Unique permit identifier.
    pub id: PermitId,
    /// Submitting applicant, if the link survived.
    pub applicant_id: Option<PrincipalId>,
    /// Applicant name, joined from the profile.
    pub applicant: Option<ApplicantName>,
    /// Permit type, joined.
    pub permit_type: Option<PermitType>,
    /// Review status.
    pub status: PermitStatus,
    /// Site or business address.
    pub address: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last transition time.
    pub updated_at: DateTime<Utc>,
}

impl Permit {
    /// Id of the joined permit type, if any.
    pub fn permit_type_id(&self) -> Option<PermitTypeId> {
        self.permit_type.as_ref().map(|t| t.id)
    }

    /// Applicant full name, empty when unknown.
    pub fn applicant_full_name(&self) -> String {
        self.applicant
            .as_ref()
            .map(ApplicantName::full_name)
            .unwrap_or_default()
    }

    /// Permit type title, if a type is joined.
    pub fn permit_type_title(&self) -> Option<&str> {
        self.permit_type.as_ref().map(|t| t.title.as_str())
    }
}

/// Fully detailed permit record, fetched for printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedPermit {
    /// The summary fields.
    pub permit: Permit,
    /// Applicant email.
    pub applicant_email: Option<String>,
    /// Applicant contact number.
    pub applicant_phone: Option<String>,
    /// Applicant home address.
    pub applicant_address: Option<String>,
    /// Registered business name (business permits).
    pub business_name: Option<String>,
    /// Stated purpose of the application.
    pub purpose: Option<String>,
    /// Staff member who approved or rejected.
    pub reviewed_by: Option<PrincipalId>,
    /// Approval time.
    pub approved_at: Option<DateTime<Utc>>,
    /// Remaining form answers.
    pub form_data: serde_json::Value,
}

impl DetailedPermit {
    /// Template family for this permit.
    pub fn family(&self) -> PermitFamily {
        self.permit
            .permit_type
            .as_ref()
            .map(PermitType::family)
            .unwrap_or(PermitFamily::Generic)
    }
}
