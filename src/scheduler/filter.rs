//! Selecting which jobs take part in a run.

use crate::calendar::Period;
use crate::domain::Job;

/// Jobs that can be worked in `period`, optionally limited to one client.
///
/// A job arriving after the period end is left out. The client filter is
/// compared against normalized client keys, so it is case-insensitive.
pub fn select_jobs(jobs: &[Job], period: Period, client: Option<&str>) -> Vec<Job> {
    let client = client.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty());
    jobs.iter()
        .filter(|job| job.arrival.is_none_or(|arrival| arrival <= period.end))
        .filter(|job| match &client {
            Some(c) => job.client_key() == *c,
            None => true,
        })
        .cloned()
        .collect()
}
