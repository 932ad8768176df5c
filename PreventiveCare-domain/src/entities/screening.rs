use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Where a screening stands for a patient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    DueNow,
    DueSoon,
    UpToDate,
    NotApplicable,
}

impl ScreeningStatus {
    /// Display order, lowest first
    pub fn priority(self) -> u8 {
        match self {
            ScreeningStatus::DueNow => 0,
            ScreeningStatus::DueSoon => 1,
            ScreeningStatus::UpToDate => 2,
            ScreeningStatus::NotApplicable => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreeningStatus::DueNow => "due_now",
            ScreeningStatus::DueSoon => "due_soon",
            ScreeningStatus::UpToDate => "up_to_date",
            ScreeningStatus::NotApplicable => "not_applicable",
        }
    }
}

impl std::fmt::Display for ScreeningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The screenings the engine knows how to recommend.
/// Serialized as the stable item id (e.g. "blood_pressure").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ScreeningKind {
    BloodPressure,
    Cholesterol,
    Diabetes,
    Colorectal,
    Mammogram,
    Cervical,
    LungCancer,
    Hiv,
    Depression,
    TobaccoCounseling,
    AlcoholCounseling,
    Sti,
    Osteoporosis,
    Aaa,
    HepatitisC,
    HepatitisB,
}

impl ScreeningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreeningKind::BloodPressure => "blood_pressure",
            ScreeningKind::Cholesterol => "cholesterol",
            ScreeningKind::Diabetes => "diabetes",
            ScreeningKind::Colorectal => "colorectal",
            ScreeningKind::Mammogram => "mammogram",
            ScreeningKind::Cervical => "cervical",
            ScreeningKind::LungCancer => "lung_cancer",
            ScreeningKind::Hiv => "hiv",
            ScreeningKind::Depression => "depression",
            ScreeningKind::TobaccoCounseling => "tobacco_counseling",
            ScreeningKind::AlcoholCounseling => "alcohol_counseling",
            ScreeningKind::Sti => "sti",
            ScreeningKind::Osteoporosis => "osteoporosis",
            ScreeningKind::Aaa => "aaa",
            ScreeningKind::HepatitisC => "hepatitis_c",
            ScreeningKind::HepatitisB => "hepatitis_b",
        }
    }

    /// Human label shown on the checklist
    pub fn display_name(self) -> &'static str {
        match self {
            ScreeningKind::BloodPressure => "Blood Pressure Check",
            ScreeningKind::Cholesterol => "Cholesterol Screening",
            ScreeningKind::Diabetes => "Diabetes Screening",
            ScreeningKind::Colorectal => "Colorectal Cancer Screening",
            ScreeningKind::Mammogram => "Mammogram",
            ScreeningKind::Cervical => "Cervical Cancer Screening",
            ScreeningKind::LungCancer => "Lung Cancer Screening",
            ScreeningKind::Hiv => "HIV Test",
            ScreeningKind::Depression => "Depression Screening",
            ScreeningKind::TobaccoCounseling => "Tobacco Cessation Support",
            ScreeningKind::AlcoholCounseling => "Alcohol Use Counseling",
            ScreeningKind::Sti => "STI Screening",
            ScreeningKind::Osteoporosis => "Bone Density Scan",
            ScreeningKind::Aaa => "Abdominal Aortic Aneurysm Screening",
            ScreeningKind::HepatitisC => "Hepatitis C Test",
            ScreeningKind::HepatitisB => "Hepatitis B Test",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ScreeningKind::BloodPressure => "🩺",
            ScreeningKind::Cholesterol => "🫀",
            ScreeningKind::Diabetes => "🩸",
            ScreeningKind::Colorectal => "🔬",
            ScreeningKind::Mammogram => "🎗️",
            ScreeningKind::Cervical => "🌸",
            ScreeningKind::LungCancer => "🫁",
            ScreeningKind::Hiv => "🧪",
            ScreeningKind::Depression => "🧠",
            ScreeningKind::TobaccoCounseling => "🚭",
            ScreeningKind::AlcoholCounseling => "🍷",
            ScreeningKind::Sti => "🛡️",
            ScreeningKind::Osteoporosis => "🦴",
            ScreeningKind::Aaa => "🩻",
            ScreeningKind::HepatitisC => "💉",
            ScreeningKind::HepatitisB => "💉",
        }
    }
}

/// One screening recommendation for a patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ScreeningItem {
    /// Stable identifier (e.g. "colorectal")
    pub id: ScreeningKind,

    pub name: String,

    pub emoji: String,

    pub status: ScreeningStatus,

    /// Why the screening applies to this patient
    pub reason: String,

    /// How often the screening repeats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    /// Alternative ways to complete the screening
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ScreeningItem {
    pub fn new(kind: ScreeningKind, status: ScreeningStatus, reason: impl Into<String>) -> Self {
        Self {
            id: kind,
            name: kind.display_name().to_string(),
            emoji: kind.emoji().to_string(),
            status,
            reason: reason.into(),
            frequency: None,
            options: None,
        }
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Number of screenings in each status bucket
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub due_now: usize,
    pub due_soon: usize,
    pub up_to_date: usize,
    pub not_applicable: usize,
}

/// Screenings partitioned by status, each bucket in its original order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GroupedScreenings {
    pub due_now: Vec<ScreeningItem>,
    pub due_soon: Vec<ScreeningItem>,
    pub up_to_date: Vec<ScreeningItem>,
    pub not_applicable: Vec<ScreeningItem>,
}

impl GroupedScreenings {
    /// The bucket holding items of the given status
    pub fn bucket(&self, status: ScreeningStatus) -> &[ScreeningItem] {
        match status {
            ScreeningStatus::DueNow => &self.due_now,
            ScreeningStatus::DueSoon => &self.due_soon,
            ScreeningStatus::UpToDate => &self.up_to_date,
            ScreeningStatus::NotApplicable => &self.not_applicable,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            due_now: self.due_now.len(),
            due_soon: self.due_soon.len(),
            up_to_date: self.up_to_date.len(),
            not_applicable: self.not_applicable.len(),
        }
    }

    /// Total number of items across all buckets
    pub fn len(&self) -> usize {
        self.due_now.len() + self.due_soon.len() + self.up_to_date.len() + self.not_applicable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate the buckets in priority order
    pub fn into_ordered(self) -> Vec<ScreeningItem> {
        let mut items = self.due_now;
        items.extend(self.due_soon);
        items.extend(self.up_to_date);
        items.extend(self.not_applicable);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_priority_order() {
        assert!(ScreeningStatus::DueNow.priority() < ScreeningStatus::DueSoon.priority());
        assert!(ScreeningStatus::DueSoon.priority() < ScreeningStatus::UpToDate.priority());
        assert!(ScreeningStatus::UpToDate.priority() < ScreeningStatus::NotApplicable.priority());
    }

    #[test]
    fn test_kind_serializes_as_stable_id() {
        for kind in [
            ScreeningKind::BloodPressure,
            ScreeningKind::LungCancer,
            ScreeningKind::HepatitisC,
            ScreeningKind::Aaa,
            ScreeningKind::TobaccoCounseling,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_item_json_shape() {
        let item = ScreeningItem::new(
            ScreeningKind::Colorectal,
            ScreeningStatus::DueNow,
            "Recommended for adults 45-75",
        )
        .with_options(["Annual FIT (stool test)", "Colonoscopy every 10 years"]);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "colorectal");
        assert_eq!(value["status"], "due_now");
        assert_eq!(value["name"], "Colorectal Cancer Screening");
        assert_eq!(value["options"].as_array().unwrap().len(), 2);
        // Absent frequency is omitted rather than null
        assert!(value.get("frequency").is_none());
    }

    #[test]
    fn test_grouped_counts_and_order() {
        let grouped = GroupedScreenings {
            due_now: vec![ScreeningItem::new(ScreeningKind::Hiv, ScreeningStatus::DueNow, "")],
            due_soon: vec![ScreeningItem::new(ScreeningKind::HepatitisC, ScreeningStatus::DueSoon, "")],
            up_to_date: vec![],
            not_applicable: vec![ScreeningItem::new(ScreeningKind::LungCancer, ScreeningStatus::NotApplicable, "")],
        };

        let counts = grouped.counts();
        assert_eq!(counts.due_now, 1);
        assert_eq!(counts.up_to_date, 0);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped.bucket(ScreeningStatus::DueSoon)[0].id, ScreeningKind::HepatitisC);

        let ordered: Vec<ScreeningKind> = grouped.into_ordered().iter().map(|i| i.id).collect();
        assert_eq!(
            ordered,
            vec![ScreeningKind::Hiv, ScreeningKind::HepatitisC, ScreeningKind::LungCancer]
        );
    }
}
