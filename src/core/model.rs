// HireScope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Applicant record
// =============================================================================

/// One row of the applicant table as exported from the tracking system.
///
/// Every searchable attribute is optional; an absent attribute is treated as
/// empty text when matching. `id` is carried through to exports but is never
/// searched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantRecord {
    /// Opaque identifier from the source system.
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<String>,

    #[serde(deserialize_with = "empty_as_none")]
    pub full_name: Option<String>,

    /// Highest education level (e.g. "Bachelor", "Master").
    #[serde(deserialize_with = "empty_as_none")]
    pub education_level: Option<String>,

    /// Pipeline status (e.g. "Screening", "Interview").
    #[serde(deserialize_with = "empty_as_none")]
    pub application_status: Option<String>,

    /// Hiring decision (e.g. "Hired", "Rejected").
    #[serde(deserialize_with = "empty_as_none")]
    pub decision: Option<String>,

    #[serde(deserialize_with = "empty_as_none")]
    pub referral_name: Option<String>,

    #[serde(deserialize_with = "empty_as_none")]
    pub referral_email: Option<String>,

    #[serde(deserialize_with = "empty_as_none")]
    pub referral_position: Option<String>,

    #[serde(deserialize_with = "empty_as_none")]
    pub referral_department: Option<String>,
}

/// Treat empty strings (blank CSV cells, `""` in JSON) as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl ApplicantRecord {
    /// Value of a single searchable field.
    pub fn field(&self, field: SearchField) -> Option<&str> {
        let value = match field {
            SearchField::FullName => &self.full_name,
            SearchField::EducationLevel => &self.education_level,
            SearchField::ApplicationStatus => &self.application_status,
            SearchField::Decision => &self.decision,
            SearchField::ReferralName => &self.referral_name,
            SearchField::ReferralEmail => &self.referral_email,
            SearchField::ReferralPosition => &self.referral_position,
            SearchField::ReferralDepartment => &self.referral_department,
        };
        value.as_deref()
    }

    /// Present, non-empty searchable values in `SearchField::all()` order.
    pub fn searchable_values(&self) -> impl Iterator<Item = &str> + '_ {
        SearchField::all()
            .iter()
            .filter_map(move |f| self.field(*f))
            .filter(|v| !v.is_empty())
    }

    /// True if there is nothing to search in this record.
    pub fn is_blank(&self) -> bool {
        self.searchable_values().next().is_none()
    }
}

// =============================================================================
// Searchable fields
// =============================================================================

/// The fixed set of attributes a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    FullName,
    EducationLevel,
    ApplicationStatus,
    Decision,
    ReferralName,
    ReferralEmail,
    ReferralPosition,
    ReferralDepartment,
}

impl SearchField {
    /// Returns all variants in column order.
    pub fn all() -> &'static [SearchField] {
        &[
            SearchField::FullName,
            SearchField::EducationLevel,
            SearchField::ApplicationStatus,
            SearchField::Decision,
            SearchField::ReferralName,
            SearchField::ReferralEmail,
            SearchField::ReferralPosition,
            SearchField::ReferralDepartment,
        ]
    }

    /// Column key used in CSV headers and JSON objects.
    pub fn key(&self) -> &'static str {
        match self {
            SearchField::FullName => "full_name",
            SearchField::EducationLevel => "education_level",
            SearchField::ApplicationStatus => "application_status",
            SearchField::Decision => "decision",
            SearchField::ReferralName => "referral_name",
            SearchField::ReferralEmail => "referral_email",
            SearchField::ReferralPosition => "referral_position",
            SearchField::ReferralDepartment => "referral_department",
        }
    }

    /// Human-readable label for table headers.
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::FullName => "Name",
            SearchField::EducationLevel => "Education",
            SearchField::ApplicationStatus => "Status",
            SearchField::Decision => "Decision",
            SearchField::ReferralName => "Referrer",
            SearchField::ReferralEmail => "Referrer Email",
            SearchField::ReferralPosition => "Referrer Position",
            SearchField::ReferralDepartment => "Referrer Department",
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
