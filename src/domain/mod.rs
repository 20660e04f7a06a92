//! Domain types for Officina
//!
//! - Job: a unit of repair work with hours, window, roles and optional locks
//! - Team: the mechanic and electrical pools with per-worker daily capacity
//! - ClientAffinity: sticky client → mechanic preference carried between runs
//! - Snapshot: everything above plus the period, as persisted and exchanged

pub mod affinity;
pub mod hours;
pub mod job;
pub mod snapshot;
pub mod team;

pub use affinity::ClientAffinity;
pub use hours::{HOURS_EPSILON, round_hours, sanitize_hours};
pub use job::{CLIENT_SEPARATOR, Job, Role, client_key};
pub use snapshot::Snapshot;
pub use team::{Pool, Team, Worker};
