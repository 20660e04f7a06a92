//! Allocation driver: the greedy day-by-day placement of job hours.
//!
//! # Algorithm
//!
//! 1. Order jobs by [`compare_jobs`](crate::scheduler::compare_jobs).
//! 2. For each job, walk the days of its effective window while hours remain.
//! 3. Mechanic phase: pick a mechanic (lock > prior assignee > client affinity >
//!    most free), take `min(free, remaining)`.
//! 4. Electrical phase: only when the mechanic phase placed nothing that day
//!    (lock > prior assignee > most free).
//! 5. Hours still unplaced after the window become a risk record.
//!
//! A run is a pure function of its inputs: no I/O, no clocks, no randomness.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::domain::{ClientAffinity, HOURS_EPSILON, Job, Pool, Snapshot, Team, round_hours};
use crate::scheduler::filter::select_jobs;
use crate::scheduler::ledger::{CapacityLedger, DayCapacity};
use crate::scheduler::priority::order_jobs;
use crate::scheduler::select::{Preferences, select_worker};

/// Knobs for a scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// A job gets at most one pool's hours per calendar day.
    #[serde(rename = "same-day-exclusive")]
    pub same_day_exclusive: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            same_day_exclusive: true,
        }
    }
}

/// Hours of one job given to one worker on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub day: NaiveDate,
    #[serde(rename = "role")]
    pub pool: Pool,
    pub worker_id: String,
    pub job_id: String,
    /// Rounded to two decimals
    pub hours: f64,
}

/// A job whose hours did not all fit in its window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub job_id: String,
    pub title: String,
    /// Unplaced hours, rounded to two decimals
    pub remaining: f64,
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub period: Period,
    /// In job-priority-then-day order
    pub allocations: Vec<Allocation>,
    pub capacity: Vec<DayCapacity>,
    pub risks: Vec<Risk>,
    /// Input affinity plus entries learned during the run
    pub affinity: ClientAffinity,
}

impl Schedule {
    pub fn allocations_for<'a>(&'a self, job_id: &'a str) -> impl Iterator<Item = &'a Allocation> + 'a {
        self.allocations.iter().filter(move |a| a.job_id == job_id)
    }

    pub fn allocated_hours(&self, job_id: &str) -> f64 {
        round_hours(self.allocations_for(job_id).map(|a| a.hours).sum())
    }

    pub fn risk_for(&self, job_id: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.job_id == job_id)
    }

    /// Find the allocation a manual override refers to.
    pub fn find_allocation(&self, job_id: &str, day: NaiveDate, pool: Pool) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|a| a.job_id == job_id && a.day == day && a.pool == pool)
    }

    pub fn total_allocated(&self, pool: Pool) -> f64 {
        round_hours(self.allocations.iter().filter(|a| a.pool == pool).map(|a| a.hours).sum())
    }
}

/// Last worker used for a job within a run, per pool.
#[derive(Debug, Clone, Default)]
struct Assignees {
    mechanic: Option<String>,
    electrical: Option<String>,
}

impl Assignees {
    fn get(&self, pool: Pool) -> Option<&str> {
        match pool {
            Pool::Mechanic => self.mechanic.as_deref(),
            Pool::Electrical => self.electrical.as_deref(),
        }
    }

    fn set(&mut self, pool: Pool, worker_id: String) {
        match pool {
            Pool::Mechanic => self.mechanic = Some(worker_id),
            Pool::Electrical => self.electrical = Some(worker_id),
        }
    }
}

/// Mutable state of a run in progress.
struct Run {
    ledger: CapacityLedger,
    affinity: ClientAffinity,
    assignees: HashMap<String, Assignees>,
    allocations: Vec<Allocation>,
    risks: Vec<Risk>,
}

impl Run {
    /// Try to place part of `remaining` for `job` in `pool` on `day`.
    ///
    /// Returns the hours placed (zero when nobody could be selected).
    fn work_pool(&mut self, job: &Job, client: &str, pool: Pool, day: NaiveDate, remaining: f64) -> f64 {
        let selected = {
            let prior = self.assignees.get(&job.id).and_then(|a| a.get(pool));
            let mut prefs = Preferences::new(job.lock_for(pool)).then(prior);
            if pool == Pool::Mechanic {
                prefs = prefs.then(self.affinity.preferred(client));
            }
            let selected = select_worker(self.ledger.slots(day, pool), &prefs);
            if selected.is_none() && prefs.is_locked() {
                tracing::trace!(job = %job.id, %day, %pool, lock = ?prefs.lock(), "Locked worker unavailable");
            }
            selected
        };
        let Some(index) = selected else {
            return 0.0;
        };

        let taken = self.ledger.consume(day, pool, index, remaining);
        if taken <= HOURS_EPSILON {
            return 0.0;
        }
        let worker_id = self.ledger.slots(day, pool)[index].worker_id.clone();

        self.assignees
            .entry(job.id.clone())
            .or_default()
            .set(pool, worker_id.clone());
        if pool == Pool::Mechanic && self.affinity.remember(client, &worker_id) {
            tracing::debug!(client, worker = %worker_id, "Learned client affinity");
        }

        let hours = round_hours(taken);
        if hours > 0.0 {
            tracing::debug!(job = %job.id, %day, %pool, worker = %worker_id, hours, "Allocated");
            self.allocations.push(Allocation {
                day,
                pool,
                worker_id,
                job_id: job.id.clone(),
                hours,
            });
        }
        taken
    }
}

/// Greedy work-order scheduler.
///
/// # Example
///
/// ```
/// use officina::calendar::Period;
/// use officina::domain::{ClientAffinity, Job, Team, Worker};
/// use officina::scheduler::Planner;
///
/// let period = Period::parse("2025-08-18", "2025-08-18").unwrap();
/// let team = Team::new(vec![Worker::new("M1", 8.0)], vec![]);
/// let jobs = vec![Job::with_id("j1", "Rossi - Brakes", 6.0)];
///
/// let schedule = Planner::new().schedule(&jobs, &team, period, ClientAffinity::new());
/// assert_eq!(schedule.allocations.len(), 1);
/// assert_eq!(schedule.allocations[0].hours, 6.0);
/// assert!(schedule.risks.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    options: PlannerOptions,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the scheduler over `jobs` for `period`, seeded with `affinity`.
    pub fn schedule(&self, jobs: &[Job], team: &Team, period: Period, affinity: ClientAffinity) -> Schedule {
        let days = period.days();
        let mut run = Run {
            ledger: CapacityLedger::new(&days, team),
            affinity,
            assignees: HashMap::new(),
            allocations: Vec::new(),
            risks: Vec::new(),
        };

        for job in order_jobs(jobs, period.start) {
            self.place_job(&mut run, job, &days, period);
        }

        tracing::debug!(
            %period,
            jobs = jobs.len(),
            allocations = run.allocations.len(),
            risks = run.risks.len(),
            "Scheduling run complete"
        );

        Schedule {
            period,
            capacity: run.ledger.aggregate(),
            allocations: run.allocations,
            risks: run.risks,
            affinity: run.affinity,
        }
    }

    /// Filter a snapshot's jobs (optionally to one client) and schedule them.
    pub fn schedule_snapshot(&self, snapshot: &Snapshot, client: Option<&str>) -> Schedule {
        let period = snapshot.period();
        let jobs = select_jobs(&snapshot.jobs, period, client);
        self.schedule(&jobs, &snapshot.team, period, snapshot.client_affinity.clone())
    }

    fn place_job(&self, run: &mut Run, job: &Job, days: &[NaiveDate], period: Period) {
        let mut remaining = job.work_hours();
        let first = job.arrival.map_or(period.start, |d| d.max(period.start));
        let last = job.deadline.map_or(period.end, |d| d.min(period.end));
        let client = job.client_key();

        for &day in days.iter().filter(|d| first <= **d && **d <= last) {
            if remaining <= HOURS_EPSILON {
                break;
            }

            let mut worked_today = false;
            if job.needs(Pool::Mechanic) {
                let taken = run.work_pool(job, &client, Pool::Mechanic, day, remaining);
                if taken > 0.0 {
                    remaining -= taken;
                    worked_today = true;
                }
            }

            if worked_today && self.options.same_day_exclusive {
                continue;
            }

            if job.needs(Pool::Electrical) && remaining > HOURS_EPSILON {
                remaining -= run.work_pool(job, &client, Pool::Electrical, day, remaining);
            }
        }

        if remaining > HOURS_EPSILON {
            tracing::debug!(job = %job.id, remaining, "Job at risk");
            run.risks.push(Risk {
                job_id: job.id.clone(),
                title: job.title.clone(),
                remaining: round_hours(remaining),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;
    use crate::domain::{Role, Worker};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn period(start: &str, end: &str) -> Period {
        Period::parse(start, end).unwrap()
    }

    fn team(mechanics: &[(&str, f64)], electricians: &[(&str, f64)]) -> Team {
        let workers = |roster: &[(&str, f64)]| roster.iter().map(|(id, h)| Worker::new(id, *h)).collect();
        Team::new(workers(mechanics), workers(electricians))
    }

    fn run(jobs: &[Job], team: &Team, period: Period) -> Schedule {
        Planner::new().schedule(jobs, team, period, ClientAffinity::new())
    }

    #[test]
    fn test_single_job_fits_one_day() {
        let jobs = vec![
            Job::with_id("j1", "Rossi - Brakes", 6.0)
                .with_arrival(d("2025-08-18"))
                .with_deadline(d("2025-08-18")),
        ];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-22"));
        assert_eq!(
            s.allocations,
            vec![Allocation {
                day: d("2025-08-18"),
                pool: Pool::Mechanic,
                worker_id: "M1".to_string(),
                job_id: "j1".to_string(),
                hours: 6.0,
            }]
        );
        assert!(s.risks.is_empty());
    }

    #[test]
    fn test_overflow_becomes_risk() {
        let jobs = vec![Job::with_id("j1", "Rossi - Clutch", 10.0).with_deadline(d("2025-08-18"))];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-18"));
        assert_eq!(s.allocations.len(), 1);
        assert_eq!(s.allocations[0].hours, 8.0);
        assert_eq!(
            s.risks,
            vec![Risk {
                job_id: "j1".to_string(),
                title: "Rossi - Clutch".to_string(),
                remaining: 2.0,
            }]
        );
    }

    #[test]
    fn test_job_spills_over_days_with_same_worker() {
        let jobs = vec![Job::with_id("j1", "VAS - Exhaust", 14.0)];
        let s = run(&jobs, &team(&[("M1", 8.0), ("M2", 8.0)], &[]), period("2025-08-18", "2025-08-22"));
        assert_eq!(s.allocations.len(), 2);
        assert_eq!(s.allocations[0].day, d("2025-08-18"));
        assert_eq!(s.allocations[0].hours, 8.0);
        assert_eq!(s.allocations[1].day, d("2025-08-19"));
        assert_eq!(s.allocations[1].hours, 6.0);
        // Continuity: both days on the first worker chosen
        assert_eq!(s.allocations[0].worker_id, s.allocations[1].worker_id);
    }

    #[test]
    fn test_prior_mechanic_beats_affinity() {
        let jobs = vec![
            Job::with_id("fill", "Aldi - Gearbox", 8.0)
                .with_deadline(d("2025-08-18"))
                .with_locked_mechanic("M1"),
            Job::with_id("a", "Ceroni - Clutch", 12.0).with_deadline(d("2025-08-19")),
        ];
        let mut affinity = ClientAffinity::new();
        affinity.assign("ceroni", "M1");
        let s = Planner::new().schedule(
            &jobs,
            &team(&[("M1", 8.0), ("M2", 8.0)], &[]),
            period("2025-08-18", "2025-08-19"),
            affinity,
        );

        let fill: Vec<_> = s.allocations_for("fill").collect();
        assert_eq!((fill[0].day, fill[0].worker_id.as_str()), (d("2025-08-18"), "M1"));

        // Day 1 falls back to M2 because M1 is full; day 2 stays on M2 although M1 is free again.
        let a: Vec<_> = s.allocations_for("a").collect();
        assert_eq!(a.len(), 2);
        assert_eq!((a[0].day, a[0].worker_id.as_str(), a[0].hours), (d("2025-08-18"), "M2", 8.0));
        assert_eq!((a[1].day, a[1].worker_id.as_str(), a[1].hours), (d("2025-08-19"), "M2", 4.0));
        assert_eq!(s.affinity.preferred("ceroni"), Some("M1"));
    }

    #[test]
    fn test_prior_electrician_beats_most_free() {
        let jobs = vec![
            Job::with_id("fill", "Aldi - Wiring", 8.0)
                .with_roles(&[Role::ElectricalMandatory])
                .with_deadline(d("2025-08-18"))
                .with_locked_electrician("E1"),
            Job::with_id("b", "Tudini - Tachograph", 10.0)
                .with_roles(&[Role::ElectricalMandatory])
                .with_deadline(d("2025-08-19")),
        ];
        let s = run(
            &jobs,
            &team(&[], &[("E1", 8.0), ("E2", 6.0)]),
            period("2025-08-18", "2025-08-19"),
        );

        // E1 has 8h free on day 2 against E2's 6h, but the job keeps E2.
        let b: Vec<_> = s.allocations_for("b").collect();
        assert_eq!(b.len(), 2);
        assert_eq!((b[0].day, b[0].worker_id.as_str(), b[0].hours), (d("2025-08-18"), "E2", 6.0));
        assert_eq!((b[1].day, b[1].worker_id.as_str(), b[1].hours), (d("2025-08-19"), "E2", 4.0));
        assert!(s.risks.is_empty());
    }

    #[test]
    fn test_mechanic_phase_blocks_electrical_same_day() {
        let jobs = vec![Job::with_id("j1", "T.M. - Clutch + SW", 3.0).with_roles(&[Role::Mechanic, Role::ElectricalMandatory])];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[("E1", 8.0)]), period("2025-08-18", "2025-08-19"));
        assert_eq!(s.allocations.len(), 1);
        assert_eq!(s.allocations[0].pool, Pool::Mechanic);
        assert_eq!(s.allocations[0].day, d("2025-08-18"));
    }

    #[test]
    fn test_electrical_takes_over_when_mechanics_are_full() {
        // The mechanic is only free for 2h per day; the job needs 12h total.
        let jobs = vec![Job::with_id("j1", "Panone - Service", 12.0).with_roles(&[Role::Mechanic, Role::ElectricalOptional])];
        let s = run(&jobs, &team(&[("M1", 2.0)], &[("E1", 8.0)]), period("2025-08-18", "2025-08-20"));
        // Mechanic works every day, so the electrician never gets a turn.
        assert!(s.allocations.iter().all(|a| a.pool == Pool::Mechanic));
        assert_eq!(s.allocations.len(), 3);
        assert_eq!(s.risk_for("j1").unwrap().remaining, 6.0);
    }

    #[test]
    fn test_electrical_runs_when_mechanic_pool_empty() {
        let jobs = vec![Job::with_id("j1", "Panone - Service", 5.0).with_roles(&[Role::Mechanic, Role::ElectricalMandatory])];
        let s = run(&jobs, &team(&[], &[("E1", 8.0)]), period("2025-08-18", "2025-08-18"));
        assert_eq!(s.allocations.len(), 1);
        assert_eq!(s.allocations[0].pool, Pool::Electrical);
        assert!(s.risks.is_empty());
    }

    #[test]
    fn test_parallel_roles_when_exclusivity_disabled() {
        let jobs = vec![Job::with_id("j1", "Panone - Service", 10.0).with_roles(&[Role::Mechanic, Role::ElectricalMandatory])];
        let planner = Planner::new().with_options(PlannerOptions {
            same_day_exclusive: false,
        });
        let s = planner.schedule(
            &jobs,
            &team(&[("M1", 4.0)], &[("E1", 8.0)]),
            period("2025-08-18", "2025-08-18"),
            ClientAffinity::new(),
        );
        assert_eq!(s.allocations.len(), 2);
        assert_eq!(s.allocations[0].pool, Pool::Mechanic);
        assert_eq!(s.allocations[0].hours, 4.0);
        assert_eq!(s.allocations[1].pool, Pool::Electrical);
        assert_eq!(s.allocations[1].hours, 6.0);
    }

    #[test]
    fn test_lock_has_no_fallback() {
        let jobs = vec![
            Job::with_id("first", "A - filler", 8.0)
                .with_locked_mechanic("M1")
                .with_deadline(d("2025-08-18")),
            Job::with_id("pinned", "B - pinned", 4.0)
                .with_locked_mechanic("M1")
                .with_deadline(d("2025-08-18")),
        ];
        let s = run(&jobs, &team(&[("M1", 8.0), ("M2", 8.0)], &[]), period("2025-08-18", "2025-08-18"));
        assert!(s.allocations.iter().all(|a| a.worker_id == "M1"));
        assert_eq!(s.risk_for("pinned").unwrap().remaining, 4.0);
    }

    #[test]
    fn test_lock_overrides_affinity() {
        let affinity: ClientAffinity = [("rossi".to_string(), "M2".to_string())].into_iter().collect();
        let jobs = vec![Job::with_id("j1", "Rossi - Brakes", 3.0).with_locked_mechanic("M3")];
        let s = Planner::new().schedule(
            &jobs,
            &team(&[("M1", 8.0), ("M2", 8.0), ("M3", 8.0)], &[]),
            period("2025-08-18", "2025-08-18"),
            affinity,
        );
        assert_eq!(s.allocations[0].worker_id, "M3");
        // Existing affinity is untouched
        assert_eq!(s.affinity.preferred("rossi"), Some("M2"));
    }

    #[test]
    fn test_affinity_learned_and_reused_within_run() {
        let jobs = vec![
            Job::with_id("a", "Ceroni - Clutch", 2.0).with_deadline(d("2025-08-18")),
            Job::with_id("b", "Ceroni - Bellows", 1.5),
        ];
        // M2 has the most room, so the first job lands there and sets affinity.
        let s = run(&jobs, &team(&[("M1", 6.0), ("M2", 8.0)], &[]), period("2025-08-18", "2025-08-19"));
        assert_eq!(s.affinity.preferred("ceroni"), Some("M2"));
        assert!(s.allocations.iter().all(|a| a.worker_id == "M2"));
    }

    #[test]
    fn test_seeded_affinity_preferred_over_most_free() {
        let affinity: ClientAffinity = [("ceroni".to_string(), "M1".to_string())].into_iter().collect();
        let jobs = vec![Job::with_id("a", "Ceroni - Clutch", 2.0)];
        let s = Planner::new().schedule(
            &jobs,
            &team(&[("M1", 4.0), ("M2", 8.0)], &[]),
            period("2025-08-18", "2025-08-18"),
            affinity,
        );
        assert_eq!(s.allocations[0].worker_id, "M1");
    }

    #[test]
    fn test_electrical_does_not_learn_affinity() {
        let jobs = vec![Job::with_id("a", "Tudini - Cab", 1.5).with_roles(&[Role::ElectricalMandatory])];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[("E1", 8.0)]), period("2025-08-18", "2025-08-18"));
        assert_eq!(s.allocations[0].pool, Pool::Electrical);
        assert!(s.affinity.is_empty());
    }

    #[test]
    fn test_window_respects_arrival_and_deadline() {
        let jobs = vec![
            Job::with_id("j1", "Azzari - Refit", 3.0)
                .with_arrival(d("2025-08-20"))
                .with_deadline(d("2025-08-21")),
        ];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-23"));
        assert_eq!(s.allocations[0].day, d("2025-08-20"));
    }

    #[test]
    fn test_deadline_before_arrival_is_all_risk() {
        let jobs = vec![
            Job::with_id("j1", "Azzari - Refit", 3.0)
                .with_arrival(d("2025-08-21"))
                .with_deadline(d("2025-08-19")),
        ];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-23"));
        assert!(s.allocations.is_empty());
        assert_eq!(s.risk_for("j1").unwrap().remaining, 3.0);
    }

    #[test]
    fn test_zero_and_negative_hours_are_no_work() {
        let jobs = vec![Job::with_id("zero", "A - x", 0.0), Job::with_id("neg", "B - y", -2.0)];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-18"));
        assert!(s.allocations.is_empty());
        assert!(s.risks.is_empty());
    }

    #[test]
    fn test_empty_pool_turns_hours_into_risk() {
        let jobs = vec![Job::with_id("j1", "Tudini - Wiring", 2.0).with_roles(&[Role::ElectricalMandatory])];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-20"));
        assert!(s.allocations.is_empty());
        assert_eq!(s.risk_for("j1").unwrap().remaining, 2.0);
    }

    #[test]
    fn test_inverted_period_schedules_nothing() {
        let jobs = vec![Job::with_id("j1", "A - x", 2.0)];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-20", "2025-08-18"));
        assert!(s.allocations.is_empty());
        assert!(s.capacity.is_empty());
        assert_eq!(s.risks.len(), 1);
    }

    #[test]
    fn test_urgent_job_goes_first() {
        let jobs = vec![
            Job::with_id("relaxed", "Alpha - x", 8.0),
            Job::with_id("urgent", "Zeta - y", 8.0).with_deadline(d("2025-08-18")),
        ];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-18"));
        assert_eq!(s.allocations[0].job_id, "urgent");
        assert_eq!(s.risk_for("relaxed").unwrap().remaining, 8.0);
    }

    #[test]
    fn test_fractional_hours_rounded() {
        let jobs = vec![Job::with_id("j1", "A - x", 1.0 / 3.0)];
        let s = run(&jobs, &team(&[("M1", 8.0)], &[]), period("2025-08-18", "2025-08-18"));
        assert_eq!(s.allocations[0].hours, 0.33);
        assert!(s.risks.is_empty());
    }

    #[test]
    fn test_capacity_aggregate_reflects_allocations() {
        let jobs = vec![Job::with_id("j1", "A - x", 5.0)];
        let s = run(&jobs, &team(&[("M1", 8.0), ("M2", 7.0)], &[("E1", 6.0)]), period("2025-08-18", "2025-08-19"));
        assert_eq!(s.capacity.len(), 2);
        assert_eq!(s.capacity[0].mechanic.free, 10.0);
        assert_eq!(s.capacity[0].mechanic.total, 15.0);
        assert_eq!(s.capacity[0].electrical.free, 6.0);
        assert_eq!(s.capacity[1].mechanic.free, 15.0);
    }

    #[test]
    fn test_schedule_snapshot_applies_client_filter() {
        let mut snapshot = Snapshot::new(period("2025-08-18", "2025-08-19"), team(&[("M1", 8.0)], &[]));
        snapshot.jobs = vec![Job::with_id("a", "Rossi - x", 2.0), Job::with_id("b", "Bianchi - y", 2.0)];
        let s = Planner::new().schedule_snapshot(&snapshot, Some("ROSSI"));
        assert_eq!(s.allocations.len(), 1);
        assert_eq!(s.allocations[0].job_id, "a");
    }

    #[test]
    fn test_allocation_serializes_role_key() {
        let a = Allocation {
            day: d("2025-08-18"),
            pool: Pool::Electrical,
            worker_id: "E1".to_string(),
            job_id: "j1".to_string(),
            hours: 1.5,
        };
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["role"], "electrical");
        assert_eq!(value["workerId"], "E1");
        assert_eq!(value["day"], "2025-08-18");
    }
}
