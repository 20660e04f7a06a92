//! Worker selection for one pool on one day.
//!
//! Preference order: hard lock > job's prior assignee > client affinity >
//! worker with the most free hours. A lock is absolute: if the locked worker is
//! missing or fully booked nobody else is picked.

use crate::scheduler::ledger::Slot;

/// Candidate chain for one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences<'a> {
    lock: Option<&'a str>,
    preferred: Vec<&'a str>,
}

impl<'a> Preferences<'a> {
    /// Start a chain, optionally pinned to a worker.
    pub fn new(lock: Option<&'a str>) -> Self {
        Self {
            lock,
            preferred: Vec::new(),
        }
    }

    /// Append a soft preference; `None` and blank ids are skipped.
    pub fn then(mut self, candidate: Option<&'a str>) -> Self {
        if let Some(id) = candidate.filter(|id| !id.trim().is_empty()) {
            self.preferred.push(id);
        }
        self
    }

    pub fn lock(&self) -> Option<&'a str> {
        self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

/// Index of the slot that receives the next chunk, or `None`.
pub fn select_worker(slots: &[Slot], prefs: &Preferences) -> Option<usize> {
    if let Some(locked) = prefs.lock {
        return find_free(slots, locked);
    }

    if let Some(idx) = prefs.preferred.iter().find_map(|id| find_free(slots, id)) {
        return Some(idx);
    }

    most_free(slots)
}

/// Slot of `worker_id` if it exists and still has time.
fn find_free(slots: &[Slot], worker_id: &str) -> Option<usize> {
    slots.iter().position(|s| s.worker_id == worker_id && s.has_free())
}

/// Slot with the most free hours; ties go to the earliest in roster order.
fn most_free(slots: &[Slot]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, slot) in slots.iter().enumerate() {
        if !slot.has_free() {
            continue;
        }
        match best {
            Some(b) if slots[b].free >= slot.free => {}
            _ => best = Some(idx),
        }
    }
    best
}
