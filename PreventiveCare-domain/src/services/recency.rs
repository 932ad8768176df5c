use crate::entities::profile::LastTest;
use crate::entities::screening::ScreeningStatus;

/// Map a "last test done" bucket and a re-test interval to a screening status.
///
/// The buckets are coarse, so this is a lookup table rather than date math:
///
/// | last test | status |
/// |---|---|
/// | absent, never, not sure | due now |
/// | within 1 year | due soon if the interval is at most 1 year, else up to date |
/// | 1-3 years | due now if the interval is at most 3 years, else up to date |
/// | over 3 years | due now |
/// | anything else | due now |
pub fn get_status_from_last_test(last_test: Option<LastTest>, due_every_years: u32) -> ScreeningStatus {
    match last_test {
        None | Some(LastTest::Never) | Some(LastTest::NotSure) => ScreeningStatus::DueNow,
        Some(LastTest::Within1Year) => {
            if due_every_years <= 1 {
                ScreeningStatus::DueSoon
            } else {
                ScreeningStatus::UpToDate
            }
        }
        Some(LastTest::OneToThreeYears) => {
            if due_every_years <= 3 {
                ScreeningStatus::DueNow
            } else {
                ScreeningStatus::UpToDate
            }
        }
        Some(LastTest::Over3Years) | Some(LastTest::Unrecognized) => ScreeningStatus::DueNow,
    }
}

/// Whether a test is overdue, i.e. classifies as due now
pub fn is_test_overdue(last_test: Option<LastTest>, years_until_due: u32) -> bool {
    get_status_from_last_test(last_test, years_until_due) == ScreeningStatus::DueNow
}
