use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Condition, family history and anatomy tags the screening rules look for
pub mod tags {
    pub const DIABETES: &str = "diabetes";
    pub const HYPERTENSION: &str = "hypertension";
    pub const HIGH_CHOLESTEROL: &str = "high_cholesterol";
    pub const HEART_DISEASE: &str = "heart_disease";

    pub const COLORECTAL_CANCER: &str = "colorectal_cancer";
    pub const BREAST_CANCER: &str = "breast_cancer";
    pub const EARLY_HEART_DISEASE: &str = "early_heart_disease";

    pub const CERVIX: &str = "cervix";
}

/// Sex assigned at birth
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SexAtBirth {
    Male,
    Female,
    /// Any value other than male or female; no sex-specific rule matches it
    #[serde(other)]
    Unspecified,
}

/// Smoking history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
    #[serde(other)]
    Other,
}

/// How often the patient drinks alcohol
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AlcoholFrequency {
    Never,
    Rarely,
    Weekly,
    Daily,
    #[serde(other)]
    Other,
}

/// When a test was last done, as reported by the patient.
///
/// These are coarse buckets, not dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum LastTest {
    #[serde(rename = "never")]
    Never,

    #[serde(rename = "within_1_year")]
    Within1Year,

    #[serde(rename = "1_3_years")]
    OneToThreeYears,

    #[serde(rename = "over_3_years")]
    Over3Years,

    #[serde(rename = "not_sure")]
    NotSure,

    /// A value outside the known buckets; classified as due now
    #[serde(other, rename = "unrecognized")]
    Unrecognized,
}

/// Self-reported health and demographic snapshot that drives the screening rules.
///
/// Every field is optional. The engine never mutates a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct PreventiveCareProfile {
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<String>,

    pub sex_at_birth: Option<SexAtBirth>,

    /// Organs present (e.g. "cervix", "uterus", "prostate").
    /// When given, this decides anatomy-based screenings instead of sex at birth.
    pub anatomy_present: Option<Vec<String>>,

    /// Captured but not used by any rule
    pub is_pregnant: Option<bool>,

    /// Captured but not used by any rule
    pub weeks_pregnant: Option<u32>,

    pub smoking_status: Option<SmokingStatus>,
    pub smoking_years: Option<f64>,
    pub packs_per_day: Option<f64>,
    pub quit_year: Option<i32>,

    pub alcohol_frequency: Option<AlcoholFrequency>,
    pub drinks_per_occasion: Option<f64>,

    pub sexually_active: Option<bool>,
    /// Any JSON number; only `> 1` matters to the rules
    pub partners_last_12_months: Option<f64>,
    pub sti_history: Option<bool>,
    pub hiv_risk: Option<bool>,

    /// Chronic condition tags (e.g. "diabetes", "hypertension")
    #[serde(deserialize_with = "null_as_empty")]
    pub conditions: Vec<String>,

    /// First-degree relative condition tags (e.g. "colorectal_cancer")
    #[serde(deserialize_with = "null_as_empty")]
    pub family_history: Vec<String>,

    pub height_inches: Option<f64>,
    pub weight_lbs: Option<f64>,

    pub last_blood_pressure: Option<LastTest>,
    pub last_cholesterol: Option<LastTest>,
    pub last_diabetes_test: Option<LastTest>,
    pub last_colonoscopy: Option<LastTest>,
    pub last_cervical_screening: Option<LastTest>,
    pub last_mammogram: Option<LastTest>,
    pub last_hiv_test: Option<LastTest>,
    pub last_depression_screening: Option<LastTest>,

    pub zip_code: Option<String>,
    pub insurance_plan: Option<String>,

    #[serde(rename = "hasPCP")]
    pub has_pcp: Option<bool>,
    pub open_to_telehealth: Option<bool>,
    #[serde(deserialize_with = "null_as_empty")]
    pub preferred_appointment_times: Vec<String>,
}

/// An explicit `null` list reads the same as a missing one
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PreventiveCareProfile {
    /// Whether a chronic condition tag is present
    pub fn has_condition(&self, tag: &str) -> bool {
        self.conditions.iter().any(|c| c == tag)
    }

    /// Whether a family history tag is present
    pub fn has_family_history(&self, tag: &str) -> bool {
        self.family_history.iter().any(|c| c == tag)
    }

    /// Whether an organ is present, or `None` when anatomy was not reported
    pub fn has_anatomy(&self, organ: &str) -> Option<bool> {
        self.anatomy_present
            .as_ref()
            .map(|organs| organs.iter().any(|o| o == organ))
    }

    pub fn is_female(&self) -> bool {
        self.sex_at_birth == Some(SexAtBirth::Female)
    }

    pub fn is_male(&self) -> bool {
        self.sex_at_birth == Some(SexAtBirth::Male)
    }

    /// Former or current smoker
    pub fn has_smoked(&self) -> bool {
        matches!(
            self.smoking_status,
            Some(SmokingStatus::Former) | Some(SmokingStatus::Current)
        )
    }

    /// HIV risk, STI history, or more than one recent partner
    pub fn has_sexual_health_risk(&self) -> bool {
        self.hiv_risk.unwrap_or(false)
            || self.sti_history.unwrap_or(false)
            || self.partners_last_12_months.unwrap_or(0.0) > 1.0
    }
}

/// A profile as held by the profile store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    /// Identifier assigned by the store on first save
    pub record_id: String,

    pub patient_id: String,

    pub profile: PreventiveCareProfile,

    /// Incremented on every save, starting at 1
    pub version: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case_profile() {
        let profile: PreventiveCareProfile = serde_json::from_value(json!({
            "dateOfBirth": "1990-04-02",
            "sexAtBirth": "female",
            "anatomyPresent": ["cervix", "uterus"],
            "smokingStatus": "former",
            "partnersLast12Months": 2,
            "lastCervicalScreening": "1_3_years",
            "lastMammogram": "within_1_year",
            "hasPCP": true
        }))
        .unwrap();

        assert_eq!(profile.date_of_birth.as_deref(), Some("1990-04-02"));
        assert!(profile.is_female());
        assert_eq!(profile.has_anatomy(tags::CERVIX), Some(true));
        assert_eq!(profile.smoking_status, Some(SmokingStatus::Former));
        assert_eq!(profile.partners_last_12_months, Some(2.0));
        assert_eq!(profile.last_cervical_screening, Some(LastTest::OneToThreeYears));
        assert_eq!(profile.last_mammogram, Some(LastTest::Within1Year));
        assert_eq!(profile.has_pcp, Some(true));
        assert!(profile.conditions.is_empty());
    }

    #[test]
    fn test_empty_object_is_a_valid_profile() {
        let profile: PreventiveCareProfile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(profile, PreventiveCareProfile::default());
        assert_eq!(profile.has_anatomy(tags::CERVIX), None);
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let profile: PreventiveCareProfile = serde_json::from_value(json!({
            "sexAtBirth": "intersex",
            "smokingStatus": "occasionally",
            "alcoholFrequency": "monthly",
            "lastHivTest": "last_summer"
        }))
        .unwrap();

        assert_eq!(profile.sex_at_birth, Some(SexAtBirth::Unspecified));
        assert_eq!(profile.smoking_status, Some(SmokingStatus::Other));
        assert_eq!(profile.alcohol_frequency, Some(AlcoholFrequency::Other));
        assert_eq!(profile.last_hiv_test, Some(LastTest::Unrecognized));
        assert!(!profile.is_female());
        assert!(!profile.is_male());
        assert!(!profile.has_smoked());
    }

    #[test]
    fn test_sexual_health_risk() {
        let mut profile = PreventiveCareProfile::default();
        assert!(!profile.has_sexual_health_risk());

        profile.partners_last_12_months = Some(1.0);
        assert!(!profile.has_sexual_health_risk());

        profile.partners_last_12_months = Some(3.0);
        assert!(profile.has_sexual_health_risk());

        let profile = PreventiveCareProfile {
            hiv_risk: Some(true),
            ..Default::default()
        };
        assert!(profile.has_sexual_health_risk());
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let profile: PreventiveCareProfile = serde_json::from_value(json!({
            "conditions": null,
            "familyHistory": null,
            "preferredAppointmentTimes": null
        }))
        .unwrap();

        assert!(profile.conditions.is_empty());
        assert!(profile.family_history.is_empty());
        assert!(profile.preferred_appointment_times.is_empty());
        assert!(!profile.has_condition(tags::DIABETES));
    }

    #[test]
    fn test_partner_count_accepts_any_number() {
        let profile: PreventiveCareProfile =
            serde_json::from_value(json!({ "partnersLast12Months": 2.0 })).unwrap();
        assert_eq!(profile.partners_last_12_months, Some(2.0));
        assert!(profile.has_sexual_health_risk());

        let profile: PreventiveCareProfile =
            serde_json::from_value(json!({ "partnersLast12Months": -1 })).unwrap();
        assert_eq!(profile.partners_last_12_months, Some(-1.0));
        assert!(!profile.has_sexual_health_risk());

        let profile: PreventiveCareProfile =
            serde_json::from_value(json!({ "partnersLast12Months": 1.5 })).unwrap();
        assert!(profile.has_sexual_health_risk());
    }

    #[test]
    fn test_last_test_serializes_to_bucket_names() {
        assert_eq!(serde_json::to_value(LastTest::OneToThreeYears).unwrap(), json!("1_3_years"));
        assert_eq!(serde_json::to_value(LastTest::Over3Years).unwrap(), json!("over_3_years"));
    }
}
