//! Derived metrics computed from a profile: age, BMI, pack-years and years since quitting.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use tracing::warn;

/// Age in full years as of today. Returns 0 when no date of birth is given.
pub fn calculate_age(date_of_birth: Option<&str>) -> i32 {
    calculate_age_on(date_of_birth, Local::now().date_naive())
}

/// Age in full years as of `today`.
///
/// One year is subtracted when this year's birthday has not happened yet.
/// A missing, empty or unparseable date yields 0.
pub fn calculate_age_on(date_of_birth: Option<&str>, today: NaiveDate) -> i32 {
    let raw = match date_of_birth.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return 0,
    };

    let Some(birth) = parse_birth_date(raw) else {
        warn!("Ignoring unparseable date of birth: {}", raw);
        return 0;
    };

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Accepts a plain date or an RFC 3339 timestamp
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Imperial BMI: `weight / height² × 703`. Returns 0 if either input is not positive.
pub fn calculate_bmi(height_inches: f64, weight_lbs: f64) -> f64 {
    if height_inches <= 0.0 || weight_lbs <= 0.0 {
        return 0.0;
    }
    (weight_lbs / (height_inches * height_inches)) * 703.0
}

/// Years smoked times packs per day. Returns 0 if either is missing or zero.
pub fn calculate_pack_years(years: Option<f64>, packs_per_day: Option<f64>) -> f64 {
    match (years, packs_per_day) {
        (Some(years), Some(packs)) if years != 0.0 && packs != 0.0 => years * packs,
        _ => 0.0,
    }
}

/// Calendar years between the quit year and the current year. Returns 0 if absent.
pub fn years_since_quit(quit_year: Option<i32>) -> i32 {
    years_since_quit_in(quit_year, Local::now().year())
}

/// Same as [`years_since_quit`] against an explicit current year. Saturates at the `i32` bounds.
pub fn years_since_quit_in(quit_year: Option<i32>, current_year: i32) -> i32 {
    match quit_year {
        Some(year) if year != 0 => current_year.saturating_sub(year),
        _ => 0,
    }
}
