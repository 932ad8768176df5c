use crate::entities::screening::{GroupedScreenings, ScreeningItem, ScreeningStatus};

/// Partition screenings into status buckets, keeping input order within each bucket
pub fn group_screenings_by_status<I>(items: I) -> GroupedScreenings
where
    I: IntoIterator<Item = ScreeningItem>,
{
    let mut grouped = GroupedScreenings::default();
    for item in items {
        let bucket = match item.status {
            ScreeningStatus::DueNow => &mut grouped.due_now,
            ScreeningStatus::DueSoon => &mut grouped.due_soon,
            ScreeningStatus::UpToDate => &mut grouped.up_to_date,
            ScreeningStatus::NotApplicable => &mut grouped.not_applicable,
        };
        bucket.push(item);
    }
    grouped
}
