//! Scheduler module: turns jobs, a team and a period into a day-by-day plan.
//!
//! This module provides:
//! - **Priority**: deadline urgency and the total order jobs are placed in.
//! - **Ledger**: per-day, per-worker remaining hours, plus capacity summaries.
//! - **Selection**: lock > prior assignee > client affinity > most free hours.
//! - **Planner**: the greedy driver producing allocations, risks and the
//!   updated affinity map.
//!
//! # Example
//!
//! ```ignore
//! use officina::scheduler::Planner;
//!
//! let schedule = Planner::new().schedule_snapshot(&snapshot, None);
//! snapshot.client_affinity = schedule.affinity.clone();
//! ```

mod engine;
mod filter;
mod ledger;
mod priority;
mod select;

pub use engine::{Allocation, Planner, PlannerOptions, Risk, Schedule};
pub use filter::select_jobs;
pub use ledger::{CapacityLedger, DayCapacity, PoolCapacity, Slot};
pub use priority::{DEADLINE_HORIZON_DAYS, PRIORITY_MAX, PRIORITY_MIN, compare_jobs, order_jobs, priority};
pub use select::{Preferences, select_worker};
