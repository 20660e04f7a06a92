//! Officina - a work-order scheduler for a repair shop
//!
//! Officina spreads the hours of open jobs over the days of a planning period,
//! drawing from a mechanic pool and an electrical pool, and reports the jobs
//! that cannot be finished in time.

pub mod calendar;
pub mod config;
pub mod domain;
pub mod error;
pub mod id;
pub mod overrides;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use error::{PlannerError, Result};
