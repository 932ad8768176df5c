use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Storage model for a patient's preventive care profile.
///
/// The store does not interpret `document`; the domain layer owns its shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    /// Unique identifier for the record, assigned on first insert
    pub id: String,

    /// Key the record is looked up by
    pub patient_id: String,

    /// Serialized profile document
    pub document: serde_json::Value,

    /// Incremented on every write, starting at 1
    pub version: u32,

    /// When the record was first stored
    pub created_at: DateTime<Utc>,

    /// When the record was last replaced
    pub updated_at: DateTime<Utc>,
}
