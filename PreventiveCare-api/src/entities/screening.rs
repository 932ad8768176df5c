use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use preventive_care_domain::entities::{
    GroupedScreenings, PreventiveCareProfile, ScreeningItem, StatusCounts,
};
use preventive_care_domain::services::{calculate_age, calculate_bmi};

/// Query parameters for evaluating a stored profile
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ScreeningQueryParams {
    /// Return the screenings bucketed by status (default: false)
    pub grouped: Option<bool>,
}

/// Derived figures shown next to a checklist
struct ProfileSummary {
    age: i32,
    bmi: f64,
}

impl ProfileSummary {
    fn of(profile: &PreventiveCareProfile) -> Self {
        let bmi = calculate_bmi(
            profile.height_inches.unwrap_or(0.0),
            profile.weight_lbs.unwrap_or(0.0),
        );
        Self {
            age: calculate_age(profile.date_of_birth.as_deref()),
            bmi: round_to_tenth(bmi),
        }
    }
}

/// Display rounding; the rules always see the exact value
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Screening checklist sorted by status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    /// Set when the report was produced from a stored profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    pub generated_at: DateTime<Utc>,

    /// Age in full years, 0 when unknown
    pub age: i32,

    /// BMI rounded to one decimal, 0 when unknown
    pub bmi: f64,

    /// Number of screenings
    pub total: usize,

    pub screenings: Vec<ScreeningItem>,
}

impl ScreeningReport {
    pub fn new(profile: &PreventiveCareProfile, screenings: Vec<ScreeningItem>) -> Self {
        let summary = ProfileSummary::of(profile);
        Self {
            patient_id: None,
            generated_at: Utc::now(),
            age: summary.age,
            bmi: summary.bmi,
            total: screenings.len(),
            screenings,
        }
    }

    pub fn for_patient(mut self, patient_id: &str) -> Self {
        self.patient_id = Some(patient_id.to_string());
        self
    }
}

/// Screening checklist bucketed by status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupedScreeningReport {
    /// Set when the report was produced from a stored profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    pub generated_at: DateTime<Utc>,

    pub age: i32,

    pub bmi: f64,

    pub counts: StatusCounts,

    pub groups: GroupedScreenings,
}

impl GroupedScreeningReport {
    pub fn new(profile: &PreventiveCareProfile, groups: GroupedScreenings) -> Self {
        let summary = ProfileSummary::of(profile);
        Self {
            patient_id: None,
            generated_at: Utc::now(),
            age: summary.age,
            bmi: summary.bmi,
            counts: groups.counts(),
            groups,
        }
    }

    pub fn for_patient(mut self, patient_id: &str) -> Self {
        self.patient_id = Some(patient_id.to_string());
        self
    }
}
