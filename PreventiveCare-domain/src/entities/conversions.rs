use preventive_care_data::models::profile::ProfileRecord;

use crate::entities::profile::{PreventiveCareProfile, StoredProfile};

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert a domain profile into the opaque document the store keeps
pub fn convert_to_data_document(profile: &PreventiveCareProfile) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(profile)
}

/// Convert from data model to domain entity for a stored profile
pub fn convert_to_domain_stored_profile(record: ProfileRecord) -> Result<StoredProfile, serde_json::Error> {
    let profile: PreventiveCareProfile = serde_json::from_value(record.document)?;

    Ok(StoredProfile {
        record_id: record.id,
        patient_id: record.patient_id,
        profile,
        version: record.version,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::profile::{LastTest, SmokingStatus};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_profile_document_round_trip_keeps_field_names() {
        let profile = PreventiveCareProfile {
            date_of_birth: Some("1970-01-31".to_string()),
            smoking_status: Some(SmokingStatus::Current),
            last_colonoscopy: Some(LastTest::Over3Years),
            conditions: vec!["diabetes".to_string()],
            ..Default::default()
        };

        let document = convert_to_data_document(&profile).unwrap();
        assert_eq!(document["dateOfBirth"], "1970-01-31");
        assert_eq!(document["lastColonoscopy"], "over_3_years");

        let record = ProfileRecord {
            id: "record-1".to_string(),
            patient_id: "patient-1".to_string(),
            document,
            version: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let stored = convert_to_domain_stored_profile(record).unwrap();
        assert_eq!(stored.record_id, "record-1");
        assert_eq!(stored.patient_id, "patient-1");
        assert_eq!(stored.version, 3);
        assert_eq!(stored.profile, profile);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let record = ProfileRecord {
            id: "record-2".to_string(),
            patient_id: "patient-2".to_string(),
            document: json!({ "conditions": "diabetes" }),
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(convert_to_domain_stored_profile(record).is_err());
    }
}
