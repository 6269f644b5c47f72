//! Aggregate statistics over a practitioner set.

use crate::constants::{STATUS_COMPLETE, STATUS_CRITICAL, STATUS_IN_PROGRESS, STATUS_PAUSED};
use crate::ids::PractitionerIds;
use crate::rows::{StatsSnapshot, StatusCountRow};
use api_shared::{PractitionerStatsRes, StatusCounts};

/// Fold grouped status counts into the four fixed buckets.
///
/// Rows whose status is null or outside the fixed set are dropped: the response schema stays
/// closed, and such rows count toward no bucket.
pub fn bucket_status_counts<'a>(
    rows: impl IntoIterator<Item = &'a StatusCountRow>,
) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for row in rows {
        let bucket = match row.status.as_deref() {
            Some(STATUS_IN_PROGRESS) => &mut counts.in_progress,
            Some(STATUS_PAUSED) => &mut counts.paused,
            Some(STATUS_COMPLETE) => &mut counts.complete,
            Some(STATUS_CRITICAL) => &mut counts.critical,
            _ => continue,
        };
        *bucket += row.count;
    }
    counts
}

/// Build the stats response for `ids` from raw aggregate figures.
///
/// `total_practitioners` is the number of distinct identifiers supplied, whether or not any of
/// them own data.
pub fn summarise(ids: &PractitionerIds, snapshot: &StatsSnapshot) -> PractitionerStatsRes {
    PractitionerStatsRes {
        total_patients: snapshot.distinct_patients,
        total_diagnoses: snapshot.total_diagnoses,
        status_counts: bucket_status_counts(&snapshot.status_rows),
        total_practitioners: ids.len() as i64,
    }
}
