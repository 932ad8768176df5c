//! Screening recommendation rules.
//!
//! Each rule looks at the patient facts on its own and either emits one
//! [`ScreeningItem`] or nothing. Rules run in a fixed order and the result is
//! stably sorted by status, so rules with the same status keep that order.

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use crate::entities::profile::{tags, AlcoholFrequency, LastTest, PreventiveCareProfile, SmokingStatus};
use crate::entities::screening::{ScreeningItem, ScreeningKind, ScreeningStatus};
use crate::services::metrics::{calculate_age_on, calculate_bmi, calculate_pack_years, years_since_quit_in};
use crate::services::recency::get_status_from_last_test;

/// BMI at which obesity starts counting as a risk factor
const OBESITY_BMI: f64 = 30.0;

/// BMI at which diabetes screening starts
const OVERWEIGHT_BMI: f64 = 25.0;

/// Pack-year history that qualifies for lung cancer screening
const LUNG_SCREENING_PACK_YEARS: f64 = 20.0;

/// Lung cancer screening stops this many years after quitting
const LUNG_SCREENING_QUIT_WINDOW: i32 = 15;

/// Values derived once from the profile and shared by every rule
struct PatientFacts<'a> {
    profile: &'a PreventiveCareProfile,
    age: i32,
    bmi: f64,
    pack_years: f64,
    years_since_quit: i32,
}

impl<'a> PatientFacts<'a> {
    fn new(profile: &'a PreventiveCareProfile, today: NaiveDate) -> Self {
        Self {
            profile,
            age: calculate_age_on(profile.date_of_birth.as_deref(), today),
            bmi: calculate_bmi(
                profile.height_inches.unwrap_or(0.0),
                profile.weight_lbs.unwrap_or(0.0),
            ),
            pack_years: calculate_pack_years(profile.smoking_years, profile.packs_per_day),
            years_since_quit: years_since_quit_in(profile.quit_year, today.year()),
        }
    }

    /// Inclusive on both ends
    fn age_between(&self, min: i32, max: i32) -> bool {
        (min..=max).contains(&self.age)
    }

    /// Reported anatomy wins; without it, female sex implies a cervix
    fn has_cervix(&self) -> bool {
        self.profile
            .has_anatomy(tags::CERVIX)
            .unwrap_or_else(|| self.profile.is_female())
    }

    fn smoking_status(&self) -> Option<SmokingStatus> {
        self.profile.smoking_status
    }
}

type Rule = fn(&PatientFacts<'_>) -> Option<ScreeningItem>;

/// Evaluation order of the rules
const RULES: [Rule; 16] = [
    blood_pressure,
    cholesterol,
    diabetes,
    colorectal,
    mammogram,
    cervical,
    lung_cancer,
    hiv,
    depression,
    tobacco_counseling,
    alcohol_counseling,
    sti,
    osteoporosis,
    aaa,
    hepatitis_c,
    hepatitis_b,
];

/// Generate the screening checklist for a profile as of today
pub fn generate_screening_recommendations(profile: &PreventiveCareProfile) -> Vec<ScreeningItem> {
    generate_screening_recommendations_on(profile, Local::now().date_naive())
}

/// Generate the screening checklist for a profile as of `today`.
///
/// Items are ordered due now, due soon, up to date, not applicable.
pub fn generate_screening_recommendations_on(
    profile: &PreventiveCareProfile,
    today: NaiveDate,
) -> Vec<ScreeningItem> {
    let facts = PatientFacts::new(profile, today);
    debug!(
        "Evaluating {} screening rules (age {}, BMI {:.1}, {:.1} pack-years)",
        RULES.len(),
        facts.age,
        facts.bmi,
        facts.pack_years
    );

    let mut items: Vec<ScreeningItem> = RULES.iter().filter_map(|rule| rule(&facts)).collect();

    // sort_by_key is stable
    items.sort_by_key(|item| item.status.priority());

    debug!("Generated {} screening recommendations", items.len());
    items
}

fn blood_pressure(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if facts.age < 18 {
        return None;
    }

    let profile = facts.profile;
    let high_risk = profile.has_condition(tags::HYPERTENSION)
        || profile.has_condition(tags::HEART_DISEASE)
        || facts.bmi >= OBESITY_BMI;
    let due_every = if high_risk { 1 } else { 2 };
    let status = get_status_from_last_test(profile.last_blood_pressure, due_every);

    let item = if high_risk {
        ScreeningItem::new(
            ScreeningKind::BloodPressure,
            status,
            "Yearly checks recommended because of your heart health risk factors",
        )
        .with_frequency("Every year")
    } else {
        ScreeningItem::new(
            ScreeningKind::BloodPressure,
            status,
            "Recommended for all adults 18 and older",
        )
        .with_frequency("Every 2 years")
    };
    Some(item)
}

fn cholesterol(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let profile = facts.profile;
    let lipid_age = if profile.is_male() { 35 } else { 45 };

    let mut risk_factors = Vec::new();
    if profile.has_condition(tags::DIABETES) {
        risk_factors.push("diabetes");
    }
    if profile.has_condition(tags::HYPERTENSION) {
        risk_factors.push("high blood pressure");
    }
    if profile.has_condition(tags::HIGH_CHOLESTEROL) {
        risk_factors.push("high cholesterol");
    }
    if profile.has_condition(tags::HEART_DISEASE) {
        risk_factors.push("heart disease");
    }
    if profile.has_family_history(tags::EARLY_HEART_DISEASE) {
        risk_factors.push("a family history of early heart disease");
    }
    if facts.bmi >= OBESITY_BMI {
        risk_factors.push("a BMI of 30 or higher");
    }

    let eligible = facts.age >= lipid_age || (facts.age >= 20 && !risk_factors.is_empty());
    if !eligible {
        return None;
    }

    let status = match profile.last_cholesterol {
        Some(LastTest::Never) => ScreeningStatus::DueNow,
        last => get_status_from_last_test(last, 5),
    };

    let reason = if risk_factors.is_empty() {
        format!("Recommended for adults {} and older", lipid_age)
    } else {
        format!("Recommended because of {}", risk_factors.join(", "))
    };

    Some(
        ScreeningItem::new(ScreeningKind::Cholesterol, status, reason)
            .with_frequency("Every 5 years, more often with risk factors"),
    )
}

fn diabetes(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.age_between(35, 70) || facts.bmi < OVERWEIGHT_BMI {
        return None;
    }

    let status = get_status_from_last_test(facts.profile.last_diabetes_test, 3);
    Some(
        ScreeningItem::new(
            ScreeningKind::Diabetes,
            status,
            format!("Recommended for adults 35-70 with a BMI of {:.1}", facts.bmi),
        )
        .with_frequency("Every 3 years"),
    )
}

fn colorectal(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.age_between(45, 75) {
        return None;
    }

    let profile = facts.profile;
    let status = match profile.last_colonoscopy {
        Some(LastTest::Never) => ScreeningStatus::DueNow,
        last => get_status_from_last_test(last, 10),
    };

    let reason = if profile.has_family_history(tags::COLORECTAL_CANCER) {
        "Recommended for adults 45-75. With a family history of colorectal cancer, ask about screening more often"
    } else {
        "Recommended for adults 45-75"
    };

    Some(
        ScreeningItem::new(ScreeningKind::Colorectal, status, reason)
            .with_frequency("Depends on the test you choose")
            .with_options([
                "Annual FIT (stool test)",
                "Stool DNA test every 3 years",
                "Colonoscopy every 10 years",
            ]),
    )
}

fn mammogram(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let profile = facts.profile;
    if !profile.is_female() || !facts.age_between(40, 74) {
        return None;
    }

    let status = match profile.last_mammogram {
        Some(LastTest::Never) => ScreeningStatus::DueNow,
        last => get_status_from_last_test(last, 2),
    };

    let reason = if profile.has_family_history(tags::BREAST_CANCER) {
        "Recommended for women 40-74. A family history of breast cancer may call for earlier or additional imaging"
    } else {
        "Recommended for women 40-74"
    };

    Some(ScreeningItem::new(ScreeningKind::Mammogram, status, reason).with_frequency("Every 2 years"))
}

fn cervical(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.has_cervix() || !facts.age_between(21, 65) {
        return None;
    }

    let (due_every, reason, frequency) = if facts.age >= 30 {
        (5, "HPV test (or Pap and HPV co-test) for ages 30-65", "Every 5 years")
    } else {
        (3, "Pap test for ages 21-29", "Every 3 years")
    };
    let status = get_status_from_last_test(facts.profile.last_cervical_screening, due_every);

    Some(ScreeningItem::new(ScreeningKind::Cervical, status, reason).with_frequency(frequency))
}

fn lung_cancer(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let heavy_history = facts.pack_years >= LUNG_SCREENING_PACK_YEARS;
    let smoking = facts.smoking_status();
    let recent_smoker = match smoking {
        Some(SmokingStatus::Current) => true,
        Some(SmokingStatus::Former) => facts.years_since_quit <= LUNG_SCREENING_QUIT_WINDOW,
        _ => false,
    };

    if facts.age_between(50, 80) && heavy_history && recent_smoker {
        Some(
            ScreeningItem::new(
                ScreeningKind::LungCancer,
                ScreeningStatus::DueNow,
                format!(
                    "Low-dose CT recommended for your {:.0} pack-year smoking history",
                    facts.pack_years
                ),
            )
            .with_frequency("Every year"),
        )
    } else if smoking == Some(SmokingStatus::Former)
        && heavy_history
        && facts.years_since_quit > LUNG_SCREENING_QUIT_WINDOW
    {
        Some(ScreeningItem::new(
            ScreeningKind::LungCancer,
            ScreeningStatus::NotApplicable,
            format!(
                "You quit {} years ago. Screening is no longer needed once you have been smoke-free for more than {} years",
                facts.years_since_quit, LUNG_SCREENING_QUIT_WINDOW
            ),
        ))
    } else {
        None
    }
}

fn hiv(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.age_between(15, 65) {
        return None;
    }

    let profile = facts.profile;
    let high_risk = profile.has_sexual_health_risk();
    let last = profile.last_hiv_test;

    let status = match last {
        None | Some(LastTest::Never) => ScreeningStatus::DueNow,
        Some(_) if high_risk => get_status_from_last_test(last, 1),
        Some(LastTest::Over3Years) => ScreeningStatus::DueSoon,
        Some(_) => ScreeningStatus::UpToDate,
    };

    let item = if high_risk {
        ScreeningItem::new(
            ScreeningKind::Hiv,
            status,
            "Yearly testing recommended based on your risk factors",
        )
        .with_frequency("Every year")
    } else {
        ScreeningItem::new(
            ScreeningKind::Hiv,
            status,
            "Everyone 15-65 should be tested at least once",
        )
        .with_frequency("At least once")
    };
    Some(item)
}

fn depression(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if facts.age < 18 {
        return None;
    }

    let status = match facts.profile.last_depression_screening {
        None | Some(LastTest::Never) => ScreeningStatus::DueNow,
        last => get_status_from_last_test(last, 1),
    };

    Some(
        ScreeningItem::new(
            ScreeningKind::Depression,
            status,
            "Recommended for all adults",
        )
        .with_frequency("Every year"),
    )
}

fn tobacco_counseling(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    match facts.smoking_status() {
        Some(SmokingStatus::Current) => Some(
            ScreeningItem::new(
                ScreeningKind::TobaccoCounseling,
                ScreeningStatus::DueNow,
                "Counseling and medication can double your chances of quitting",
            )
            .with_frequency("Every visit"),
        ),
        Some(SmokingStatus::Former) => Some(ScreeningItem::new(
            ScreeningKind::TobaccoCounseling,
            ScreeningStatus::DueSoon,
            "Support to help you stay smoke-free",
        )),
        // Never-smokers get no counseling item
        _ => None,
    }
}

fn alcohol_counseling(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if facts.age < 18 {
        return None;
    }

    let profile = facts.profile;
    let risky = match profile.alcohol_frequency {
        Some(AlcoholFrequency::Daily) => true,
        Some(AlcoholFrequency::Weekly) => profile.drinks_per_occasion.unwrap_or(0.0) >= 4.0,
        _ => false,
    };
    if !risky {
        return None;
    }

    Some(ScreeningItem::new(
        ScreeningKind::AlcoholCounseling,
        ScreeningStatus::DueNow,
        "Your drinking pattern is worth a short conversation with your doctor",
    ))
}

fn sti(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let profile = facts.profile;
    if !profile.sexually_active.unwrap_or(false) {
        return None;
    }

    let mut reasons = Vec::new();
    if profile.sti_history.unwrap_or(false) {
        reasons.push("a past STI");
    }
    if profile.partners_last_12_months.unwrap_or(0.0) > 1.0 {
        reasons.push("multiple recent partners");
    }
    if facts.age < 25 {
        reasons.push("being under 25");
    }
    if reasons.is_empty() {
        return None;
    }

    Some(
        ScreeningItem::new(
            ScreeningKind::Sti,
            ScreeningStatus::DueNow,
            format!("Recommended because of {}", reasons.join(", ")),
        )
        .with_frequency("Every year"),
    )
}

fn osteoporosis(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.profile.is_female() || facts.age < 65 {
        return None;
    }

    Some(ScreeningItem::new(
        ScreeningKind::Osteoporosis,
        ScreeningStatus::DueNow,
        "DEXA scan recommended for women 65 and older",
    ))
}

fn aaa(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let profile = facts.profile;
    if !profile.is_male() || !facts.age_between(65, 75) || !profile.has_smoked() {
        return None;
    }

    Some(
        ScreeningItem::new(
            ScreeningKind::Aaa,
            ScreeningStatus::DueNow,
            "One-time ultrasound for men 65-75 who have ever smoked",
        )
        .with_frequency("One time"),
    )
}

fn hepatitis_c(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    if !facts.age_between(18, 79) {
        return None;
    }

    Some(
        ScreeningItem::new(
            ScreeningKind::HepatitisC,
            ScreeningStatus::DueSoon,
            "One-time test recommended for all adults 18-79",
        )
        .with_frequency("One time"),
    )
}

fn hepatitis_b(facts: &PatientFacts<'_>) -> Option<ScreeningItem> {
    let profile = facts.profile;
    if !profile.hiv_risk.unwrap_or(false) && !profile.sti_history.unwrap_or(false) {
        return None;
    }

    Some(ScreeningItem::new(
        ScreeningKind::HepatitisB,
        ScreeningStatus::DueSoon,
        "Recommended based on your sexual health risk factors",
    ))
}
