// Testing utilities and fixtures for the domain layer
// This module is only available for the crate's tests or when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use preventive_care_data::repository::tests::MockProfileRepository;

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::entities::profile::{
    AlcoholFrequency, LastTest, PreventiveCareProfile, SexAtBirth, SmokingStatus,
};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};

/// Fixed "today" used by date-sensitive fixtures
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or(NaiveDate::MIN)
}

/// A January 1st birth date giving exactly `age` years on `today` (any day after New Year)
pub fn date_of_birth_for_age(age: i32, today: NaiveDate) -> String {
    format!("{:04}-01-01", today.year() - age)
}

/// Fluent builder for test profiles.
///
/// Ages are resolved against [`reference_date`] unless [`ProfileBuilder::as_of`] is used.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    profile: PreventiveCareProfile,
    today: NaiveDate,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            profile: PreventiveCareProfile::default(),
            today: reference_date(),
        }
    }

    /// Resolve ages against another date. Call before `age`.
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.profile.date_of_birth = Some(date_of_birth_for_age(age, self.today));
        self
    }

    pub fn female(mut self) -> Self {
        self.profile.sex_at_birth = Some(SexAtBirth::Female);
        self
    }

    pub fn male(mut self) -> Self {
        self.profile.sex_at_birth = Some(SexAtBirth::Male);
        self
    }

    pub fn anatomy(mut self, organs: &[&str]) -> Self {
        self.profile.anatomy_present = Some(organs.iter().map(|o| o.to_string()).collect());
        self
    }

    /// Height and weight giving roughly the requested BMI
    pub fn bmi(mut self, bmi: f64) -> Self {
        let height = 70.0;
        self.profile.height_inches = Some(height);
        self.profile.weight_lbs = Some(bmi * height * height / 703.0);
        self
    }

    pub fn height_weight(mut self, height_inches: f64, weight_lbs: f64) -> Self {
        self.profile.height_inches = Some(height_inches);
        self.profile.weight_lbs = Some(weight_lbs);
        self
    }

    pub fn condition(mut self, tag: &str) -> Self {
        self.profile.conditions.push(tag.to_string());
        self
    }

    pub fn family_history(mut self, tag: &str) -> Self {
        self.profile.family_history.push(tag.to_string());
        self
    }

    pub fn never_smoked(mut self) -> Self {
        self.profile.smoking_status = Some(SmokingStatus::Never);
        self
    }

    pub fn current_smoker(mut self, years: f64, packs_per_day: f64) -> Self {
        self.profile.smoking_status = Some(SmokingStatus::Current);
        self.profile.smoking_years = Some(years);
        self.profile.packs_per_day = Some(packs_per_day);
        self
    }

    /// Former smoker who quit `years_ago` years before the builder's date
    pub fn former_smoker(mut self, years: f64, packs_per_day: f64, years_ago: i32) -> Self {
        self.profile.smoking_status = Some(SmokingStatus::Former);
        self.profile.smoking_years = Some(years);
        self.profile.packs_per_day = Some(packs_per_day);
        self.profile.quit_year = Some(self.today.year() - years_ago);
        self
    }

    pub fn alcohol(mut self, frequency: AlcoholFrequency, drinks_per_occasion: f64) -> Self {
        self.profile.alcohol_frequency = Some(frequency);
        self.profile.drinks_per_occasion = Some(drinks_per_occasion);
        self
    }

    pub fn sexually_active(mut self, partners_last_12_months: u32) -> Self {
        self.profile.sexually_active = Some(true);
        self.profile.partners_last_12_months = Some(f64::from(partners_last_12_months));
        self
    }

    pub fn sti_history(mut self) -> Self {
        self.profile.sti_history = Some(true);
        self
    }

    pub fn hiv_risk(mut self) -> Self {
        self.profile.hiv_risk = Some(true);
        self
    }

    pub fn last_blood_pressure(mut self, last: LastTest) -> Self {
        self.profile.last_blood_pressure = Some(last);
        self
    }

    pub fn last_cholesterol(mut self, last: LastTest) -> Self {
        self.profile.last_cholesterol = Some(last);
        self
    }

    pub fn last_diabetes_test(mut self, last: LastTest) -> Self {
        self.profile.last_diabetes_test = Some(last);
        self
    }

    pub fn last_colonoscopy(mut self, last: LastTest) -> Self {
        self.profile.last_colonoscopy = Some(last);
        self
    }

    pub fn last_cervical_screening(mut self, last: LastTest) -> Self {
        self.profile.last_cervical_screening = Some(last);
        self
    }

    pub fn last_mammogram(mut self, last: LastTest) -> Self {
        self.profile.last_mammogram = Some(last);
        self
    }

    pub fn last_hiv_test(mut self, last: LastTest) -> Self {
        self.profile.last_hiv_test = Some(last);
        self
    }

    pub fn last_depression_screening(mut self, last: LastTest) -> Self {
        self.profile.last_depression_screening = Some(last);
        self
    }

    pub fn build(self) -> PreventiveCareProfile {
        self.profile
    }
}

/// 30-year-old woman with a cervix, never smoked, BMI about 23, no risk factors
pub fn healthy_thirty_year_old_woman() -> PreventiveCareProfile {
    let mut profile = ProfileBuilder::new()
        .age(30)
        .female()
        .anatomy(&["cervix", "uterus"])
        .never_smoked()
        .height_weight(65.0, 140.0)
        .last_cervical_screening(LastTest::Never)
        .last_blood_pressure(LastTest::Within1Year)
        .build();
    profile.alcohol_frequency = Some(AlcoholFrequency::Never);
    profile.sexually_active = Some(false);
    profile
}

/// 60-year-old man, current smoker with 40 pack-years and high blood pressure
pub fn high_risk_sixty_year_old_man() -> PreventiveCareProfile {
    ProfileBuilder::new()
        .age(60)
        .male()
        .current_smoker(40.0, 1.0)
        .condition("hypertension")
        .bmi(31.0)
        .alcohol(AlcoholFrequency::Daily, 2.0)
        .build()
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    store_status: ComponentStatus,
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            store_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with an unreachable profile store
    pub fn with_unhealthy_store(mut self) -> Self {
        self.store_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            "profile_store".to_string(),
            HealthComponent {
                status: self.store_status.clone(),
                details: match self.store_status {
                    ComponentStatus::Healthy => Some("0 profiles stored".to_string()),
                    ComponentStatus::Unhealthy => Some("Profile store is unavailable".to_string()),
                },
            },
        );
        components.insert(
            "rules_engine".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }

    async fn check_profile_store(&self) -> Result<usize, String> {
        match self.store_status {
            ComponentStatus::Healthy => Ok(0),
            ComponentStatus::Unhealthy => Err("Profile store is unavailable".to_string()),
        }
    }
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
