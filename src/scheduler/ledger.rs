//! Capacity ledger: remaining hours per day, per pool, per worker.
//!
//! Seeded from the team roster at the start of a run and only ever drawn down.
//! Invariant: `0 <= free <= capacity` for every slot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{HOURS_EPSILON, Pool, Team, round_hours};

/// One worker's hours on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub worker_id: String,
    pub capacity: f64,
    pub free: f64,
}

impl Slot {
    fn new(worker_id: &str, capacity: f64) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            capacity,
            free: capacity,
        }
    }

    /// True when there is a usable amount of time left.
    pub fn has_free(&self) -> bool {
        self.free > HOURS_EPSILON
    }
}

#[derive(Debug, Clone, Default)]
struct DayLedger {
    mechanics: Vec<Slot>,
    electricians: Vec<Slot>,
}

impl DayLedger {
    fn slots(&self, pool: Pool) -> &[Slot] {
        match pool {
            Pool::Mechanic => &self.mechanics,
            Pool::Electrical => &self.electricians,
        }
    }

    fn slots_mut(&mut self, pool: Pool) -> &mut [Slot] {
        match pool {
            Pool::Mechanic => &mut self.mechanics,
            Pool::Electrical => &mut self.electricians,
        }
    }
}

/// Free and total hours of one pool on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolCapacity {
    pub free: f64,
    pub total: f64,
}

impl PoolCapacity {
    pub fn used(&self) -> f64 {
        round_hours(self.total - self.free)
    }
}

/// Per-day capacity summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCapacity {
    pub day: NaiveDate,
    pub mechanic: PoolCapacity,
    pub electrical: PoolCapacity,
}

impl DayCapacity {
    pub fn pool(&self, pool: Pool) -> PoolCapacity {
        match pool {
            Pool::Mechanic => self.mechanic,
            Pool::Electrical => self.electrical,
        }
    }
}

/// Remaining capacity table for one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    days: BTreeMap<NaiveDate, DayLedger>,
}

impl CapacityLedger {
    /// Every worker starts every day with their full daily capacity.
    pub fn new(days: &[NaiveDate], team: &Team) -> Self {
        let seed = |pool: Pool| -> Vec<Slot> {
            team.pool(pool)
                .iter()
                .map(|w| Slot::new(&w.id, w.capacity()))
                .collect()
        };
        let template = DayLedger {
            mechanics: seed(Pool::Mechanic),
            electricians: seed(Pool::Electrical),
        };
        let days = days.iter().map(|day| (*day, template.clone())).collect();
        Self { days }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Slots of a pool on a day, in roster order. Empty for unknown days.
    pub fn slots(&self, day: NaiveDate, pool: Pool) -> &[Slot] {
        self.days.get(&day).map(|d| d.slots(pool)).unwrap_or(&[])
    }

    /// Remaining hours of a worker on a day.
    pub fn free(&self, day: NaiveDate, pool: Pool, worker_id: &str) -> Option<f64> {
        self.slots(day, pool)
            .iter()
            .find(|s| s.worker_id == worker_id)
            .map(|s| s.free)
    }

    /// Draw up to `wanted` hours from the slot at `index`; returns what was taken.
    pub fn consume(&mut self, day: NaiveDate, pool: Pool, index: usize, wanted: f64) -> f64 {
        let Some(slot) = self.days.get_mut(&day).and_then(|d| d.slots_mut(pool).get_mut(index)) else {
            return 0.0;
        };
        let taken = slot.free.min(wanted).max(0.0);
        slot.free -= taken;
        taken
    }

    /// Free/total hours per pool per day. Does not modify the ledger.
    pub fn aggregate(&self) -> Vec<DayCapacity> {
        let summarize = |slots: &[Slot]| PoolCapacity {
            free: round_hours(slots.iter().map(|s| s.free).sum()),
            total: round_hours(slots.iter().map(|s| s.capacity).sum()),
        };
        self.days
            .iter()
            .map(|(day, ledger)| DayCapacity {
                day: *day,
                mechanic: summarize(&ledger.mechanics),
                electrical: summarize(&ledger.electricians),
            })
            .collect()
    }
}
