//! Printable plan report.
//!
//! Built only from a [`Schedule`] and the job list: one page per day, one table
//! per pool with worker, job title, vehicle/plate and hours. Pages are separated
//! by a form feed so the output prints one day per sheet.

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::calendar::format_date;
use crate::domain::{Job, Pool, round_hours};
use crate::scheduler::{Allocation, Schedule};

/// Page separator between days.
pub const PAGE_BREAK: char = '\x0c';

/// Placeholder row for a pool with no work on a day.
pub const NO_ACTIVITY: &str = "(no activity)";

/// Everything one worker does on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerLoad<'a> {
    pub worker_id: &'a str,
    pub allocations: Vec<&'a Allocation>,
}

impl WorkerLoad<'_> {
    pub fn hours(&self) -> f64 {
        round_hours(self.allocations.iter().map(|a| a.hours).sum())
    }
}

/// Allocations of one day, split by pool and worker.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    pub day: NaiveDate,
    pub mechanic: Vec<WorkerLoad<'a>>,
    pub electrical: Vec<WorkerLoad<'a>>,
}

impl<'a> DayPlan<'a> {
    fn new(day: NaiveDate) -> Self {
        Self {
            day,
            mechanic: Vec::new(),
            electrical: Vec::new(),
        }
    }

    pub fn pool(&self, pool: Pool) -> &[WorkerLoad<'a>] {
        match pool {
            Pool::Mechanic => &self.mechanic,
            Pool::Electrical => &self.electrical,
        }
    }

    fn push(&mut self, allocation: &'a Allocation) {
        let loads = match allocation.pool {
            Pool::Mechanic => &mut self.mechanic,
            Pool::Electrical => &mut self.electrical,
        };
        match loads.iter().position(|l| l.worker_id == allocation.worker_id) {
            Some(i) => loads[i].allocations.push(allocation),
            None => loads.push(WorkerLoad {
                worker_id: &allocation.worker_id,
                allocations: vec![allocation],
            }),
        }
    }
}

/// Group allocations day → pool → worker, keeping every day of the period.
///
/// Workers appear in the order they first received work that day.
pub fn group_by_day(schedule: &Schedule) -> Vec<DayPlan<'_>> {
    let mut plans: Vec<DayPlan> = schedule.period.days().into_iter().map(DayPlan::new).collect();
    let index: HashMap<NaiveDate, usize> = plans.iter().enumerate().map(|(i, p)| (p.day, i)).collect();
    for allocation in &schedule.allocations {
        if let Some(&i) = index.get(&allocation.day) {
            plans[i].push(allocation);
        }
    }
    plans
}

/// Render the full text report.
pub fn render_text(schedule: &Schedule, jobs: &[Job]) -> String {
    let jobs_by_id: HashMap<&str, &Job> = jobs.iter().map(|j| (j.id.as_str(), j)).collect();
    let mut out = String::new();
    let _ = writeln!(out, "Shop plan {}", schedule.period);

    for (i, plan) in group_by_day(schedule).iter().enumerate() {
        if i > 0 {
            out.push(PAGE_BREAK);
        }
        let _ = writeln!(out, "\n== {} ==", format_date(plan.day));
        for pool in Pool::ALL {
            let rows = pool_rows(plan.pool(pool), &jobs_by_id);
            out.push('\n');
            out.push_str(&render_table([pool.label(), "Job", "Vehicle/Plate", "Hours"], &rows));
        }
    }

    if !schedule.risks.is_empty() {
        out.push(PAGE_BREAK);
        let _ = writeln!(out, "\n== At risk ==");
        let rows: Vec<[String; 4]> = schedule
            .risks
            .iter()
            .map(|r| {
                let plate = jobs_by_id.get(r.job_id.as_str()).map(|j| j.plate.clone()).unwrap_or_default();
                [r.job_id.clone(), r.title.clone(), plate, format!("{:.2}", r.remaining)]
            })
            .collect();
        out.push('\n');
        out.push_str(&render_table(["Job id", "Job", "Vehicle/Plate", "Missing"], &rows));
    }
    out
}

fn pool_rows(loads: &[WorkerLoad], jobs_by_id: &HashMap<&str, &Job>) -> Vec<[String; 4]> {
    let mut rows = Vec::new();
    for load in loads {
        for a in &load.allocations {
            let (title, plate) = match jobs_by_id.get(a.job_id.as_str()) {
                Some(job) => (job.title.clone(), job.plate.clone()),
                None => (a.job_id.clone(), String::new()),
            };
            rows.push([load.worker_id.to_string(), title, plate, format!("{:.2}", a.hours)]);
        }
    }
    if rows.is_empty() {
        rows.push(["-".to_string(), NO_ACTIVITY.to_string(), String::new(), "0.00".to_string()]);
    }
    rows
}

/// Left-aligned columns, the last one right-aligned.
fn render_table(header: [&str; 4], rows: &[[String; 4]]) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| -> String {
        let mut s = String::new();
        for (i, cell) in cells.iter().enumerate() {
            let pad = widths[i].saturating_sub(cell.chars().count());
            if i == cells.len() - 1 {
                s.push_str(&" ".repeat(pad));
                s.push_str(cell);
            } else {
                s.push_str(cell);
                s.push_str(&" ".repeat(pad + 2));
            }
        }
        s.trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(header));
    out.push('\n');
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
        out.push('\n');
    }
    out
}
