//! Snapshot: the complete, persisted input state of the planner.
//!
//! A snapshot holds the period window, the job list, the team and the client
//! affinity map. It is what gets saved between runs and what export/import
//! exchange as JSON.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{Period, shift_date};
use crate::domain::affinity::ClientAffinity;
use crate::domain::job::{DEFAULT_JOB_TITLE, Job, Role};
use crate::domain::team::{Pool, Team};
use crate::error::{PlannerError, Result};

/// Days a period moves when duplicating a week.
pub const WEEK_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub team: Team,
    #[serde(default)]
    pub client_affinity: ClientAffinity,
}

impl Snapshot {
    /// Empty job list and affinity for a period and team.
    pub fn new(period: Period, team: Team) -> Self {
        Self {
            period_start: period.start,
            period_end: period.end,
            jobs: Vec::new(),
            team,
            client_affinity: ClientAffinity::new(),
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.period_start, self.period_end)
    }

    pub fn set_period(&mut self, period: Period) {
        self.period_start = period.start;
        self.period_end = period.end;
    }

    /// Decode and validate a snapshot.
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Pretty JSON encoding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Shape checks an importer must pass before handing data to the scheduler.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for job in &self.jobs {
            if job.id.trim().is_empty() {
                return Err(PlannerError::InvalidSnapshot(format!("job '{}' has an empty id", job.title)));
            }
            if !seen.insert(job.id.as_str()) {
                return Err(PlannerError::InvalidSnapshot(format!("duplicate job id {}", job.id)));
            }
        }
        for pool in Pool::ALL {
            if self.team.pool(pool).iter().any(|w| w.id.trim().is_empty()) {
                return Err(PlannerError::InvalidSnapshot(format!("{} pool has a worker with an empty id", pool)));
            }
        }
        if let Some((pool, id)) = self.team.duplicate_id() {
            return Err(PlannerError::InvalidSnapshot(format!("duplicate {} id {}", pool, id)));
        }
        Ok(())
    }

    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn job_mut(&mut self, job_id: &str) -> Result<&mut Job> {
        self.jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| PlannerError::JobNotFound(job_id.to_string()))
    }

    /// A one-hour mechanic job spanning the whole period.
    pub fn draft_job(&self, title: Option<&str>) -> Job {
        Job::new(title.unwrap_or(DEFAULT_JOB_TITLE), 1.0)
            .with_arrival(self.period_start)
            .with_deadline(self.period_end)
            .with_roles(&[Role::Mechanic])
    }

    /// Insert a job at the front of the list.
    pub fn add_job(&mut self, job: Job) -> Result<()> {
        if self.job(&job.id).is_some() {
            return Err(PlannerError::DuplicateJob(job.id));
        }
        self.jobs.insert(0, job);
        Ok(())
    }

    pub fn remove_job(&mut self, job_id: &str) -> Result<Job> {
        let idx = self
            .jobs
            .iter()
            .position(|j| j.id == job_id)
            .ok_or_else(|| PlannerError::JobNotFound(job_id.to_string()))?;
        Ok(self.jobs.remove(idx))
    }

    /// Sorted, de-duplicated client keys.
    pub fn clients(&self) -> Vec<String> {
        self.jobs
            .iter()
            .map(Job::client_key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Move the period one week forward, optionally dragging deadlines along.
    pub fn duplicate_week(&mut self, shift_deadlines: bool) -> Result<()> {
        let next = self.period().shifted(WEEK_DAYS)?;
        if shift_deadlines {
            for job in &mut self.jobs {
                if let Some(deadline) = job.deadline {
                    job.deadline = Some(shift_date(deadline, WEEK_DAYS)?);
                }
            }
        }
        log::info!("Period moved from {} to {}", self.period(), next);
        self.set_period(next);
        Ok(())
    }
}
