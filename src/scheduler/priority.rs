//! Job urgency and the global scheduling order.
//!
//! Jobs are prioritized by:
//! - Deadline urgency: 30 minus days left from the period start, floored at 0
//! - Client key (ascending) so one client's jobs sit together
//! - Arrival date (ascending, missing first)
//! - Deadline (ascending, missing last)

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::Job;

/// Days-to-deadline beyond which every job looks equally relaxed.
pub const DEADLINE_HORIZON_DAYS: i64 = 30;

/// Priority of a job without deadline (and of anything past the horizon).
pub const PRIORITY_MIN: i64 = 0;

/// Priority of a job due on (or before) the period start.
pub const PRIORITY_MAX: i64 = DEADLINE_HORIZON_DAYS;

/// Urgency score of a job relative to the period start.
///
/// Higher = more urgent = scheduled first. Overdue deadlines count as zero
/// days left, so the score is capped at [`PRIORITY_MAX`].
pub fn priority(job: &Job, period_start: NaiveDate) -> i64 {
    let Some(deadline) = job.deadline else {
        return PRIORITY_MIN;
    };
    let days_left = deadline.signed_duration_since(period_start).num_days().max(0);
    (DEADLINE_HORIZON_DAYS - days_left).max(PRIORITY_MIN)
}

/// Total order used to sequence jobs in a run.
pub fn compare_jobs(a: &Job, b: &Job, period_start: NaiveDate) -> Ordering {
    priority(b, period_start)
        .cmp(&priority(a, period_start))
        .then_with(|| a.client_key().cmp(&b.client_key()))
        .then_with(|| a.arrival.cmp(&b.arrival))
        .then_with(|| compare_deadlines(a.deadline, b.deadline))
}

/// Earlier deadlines first; a missing deadline sorts after any real one.
fn compare_deadlines(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Jobs in scheduling order. Stable, so full ties keep input order.
pub fn order_jobs(jobs: &[Job], period_start: NaiveDate) -> Vec<&Job> {
    let mut ordered: Vec<&Job> = jobs.iter().collect();
    ordered.sort_by(|a, b| compare_jobs(a, b, period_start));
    ordered
}
