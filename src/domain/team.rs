//! Team roster: two independent pools of workers with a fixed daily capacity.

use serde::{Deserialize, Serialize};

use crate::domain::hours::{lenient_hours, sanitize_hours};
use crate::error::{PlannerError, Result};

/// One of the two labor pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Mechanic,
    Electrical,
}

impl Pool {
    pub const ALL: [Pool; 2] = [Pool::Mechanic, Pool::Electrical];

    /// Human label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Pool::Mechanic => "Mechanic",
            Pool::Electrical => "Electrical",
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Pool {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mechanic" | "mechanics" | "meccanico" | "m" => Ok(Pool::Mechanic),
            "electrical" | "electrician" | "electricians" | "elettrauto" | "e" => Ok(Pool::Electrical),
            other => Err(format!("unknown pool: {}", other)),
        }
    }
}

/// A worker and their daily capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,

    /// Hours available on every day of a period
    #[serde(default, deserialize_with = "lenient_hours::deserialize")]
    pub hours: f64,
}

impl Worker {
    pub fn new(id: &str, hours: f64) -> Self {
        Self {
            id: id.to_string(),
            hours,
        }
    }

    /// Daily capacity with invalid amounts read as zero.
    pub fn capacity(&self) -> f64 {
        sanitize_hours(self.hours)
    }
}

/// Mechanics and electrical technicians. Ids are unique per pool only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, alias = "meccanici")]
    pub mechanics: Vec<Worker>,

    #[serde(default, alias = "elettrauti")]
    pub electricians: Vec<Worker>,
}

impl Team {
    pub fn new(mechanics: Vec<Worker>, electricians: Vec<Worker>) -> Self {
        Self {
            mechanics,
            electricians,
        }
    }

    /// The stock roster of a small shop.
    pub fn default_roster() -> Self {
        Self::new(
            vec![
                Worker::new("M1", 8.0),
                Worker::new("M2", 8.0),
                Worker::new("M3", 8.0),
                Worker::new("M4", 8.0),
                Worker::new("M5", 7.0),
            ],
            vec![Worker::new("E1", 8.0), Worker::new("E2", 8.0), Worker::new("E3", 6.0)],
        )
    }

    pub fn pool(&self, pool: Pool) -> &[Worker] {
        match pool {
            Pool::Mechanic => &self.mechanics,
            Pool::Electrical => &self.electricians,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut Vec<Worker> {
        match pool {
            Pool::Mechanic => &mut self.mechanics,
            Pool::Electrical => &mut self.electricians,
        }
    }

    pub fn find(&self, pool: Pool, worker_id: &str) -> Option<&Worker> {
        self.pool(pool).iter().find(|w| w.id == worker_id)
    }

    /// Sum of daily capacity in a pool.
    pub fn total_hours(&self, pool: Pool) -> f64 {
        self.pool(pool).iter().map(Worker::capacity).sum()
    }

    pub fn add_worker(&mut self, pool: Pool, worker: Worker) -> Result<()> {
        if self.find(pool, &worker.id).is_some() {
            return Err(PlannerError::DuplicateWorker(worker.id));
        }
        self.pool_mut(pool).push(worker);
        Ok(())
    }

    pub fn remove_worker(&mut self, pool: Pool, worker_id: &str) -> Result<Worker> {
        let workers = self.pool_mut(pool);
        let idx = workers
            .iter()
            .position(|w| w.id == worker_id)
            .ok_or_else(|| PlannerError::WorkerNotFound(worker_id.to_string()))?;
        Ok(workers.remove(idx))
    }

    pub fn set_hours(&mut self, pool: Pool, worker_id: &str, hours: f64) -> Result<()> {
        let worker = self
            .pool_mut(pool)
            .iter_mut()
            .find(|w| w.id == worker_id)
            .ok_or_else(|| PlannerError::WorkerNotFound(worker_id.to_string()))?;
        worker.hours = hours;
        Ok(())
    }

    /// First duplicated id in any pool, if one exists.
    pub fn duplicate_id(&self) -> Option<(Pool, &str)> {
        for pool in Pool::ALL {
            let workers = self.pool(pool);
            for (i, worker) in workers.iter().enumerate() {
                if workers[..i].iter().any(|w| w.id == worker.id) {
                    return Some((pool, worker.id.as_str()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_totals() {
        let team = Team::default_roster();
        assert_eq!(team.mechanics.len(), 5);
        assert_eq!(team.electricians.len(), 3);
        assert_eq!(team.total_hours(Pool::Mechanic), 39.0);
        assert_eq!(team.total_hours(Pool::Electrical), 22.0);
    }

    #[test]
    fn test_negative_capacity_reads_as_zero() {
        let team = Team::new(vec![Worker::new("M1", -3.0), Worker::new("M2", 4.0)], vec![]);
        assert_eq!(team.total_hours(Pool::Mechanic), 4.0);
    }

    #[test]
    fn test_pools_are_independent_namespaces() {
        let mut team = Team::default();
        team.add_worker(Pool::Mechanic, Worker::new("X", 8.0)).unwrap();
        team.add_worker(Pool::Electrical, Worker::new("X", 6.0)).unwrap();
        assert_eq!(team.find(Pool::Mechanic, "X").unwrap().hours, 8.0);
        assert_eq!(team.find(Pool::Electrical, "X").unwrap().hours, 6.0);
    }

    #[test]
    fn test_add_duplicate_worker_fails() {
        let mut team = Team::default_roster();
        let err = team.add_worker(Pool::Mechanic, Worker::new("M1", 8.0)).unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateWorker(id) if id == "M1"));
    }

    #[test]
    fn test_remove_and_resize_worker() {
        let mut team = Team::default_roster();
        let removed = team.remove_worker(Pool::Electrical, "E3").unwrap();
        assert_eq!(removed.hours, 6.0);
        assert!(team.find(Pool::Electrical, "E3").is_none());
        assert!(matches!(
            team.remove_worker(Pool::Electrical, "E3"),
            Err(PlannerError::WorkerNotFound(_))
        ));

        team.set_hours(Pool::Mechanic, "M5", 4.0).unwrap();
        assert_eq!(team.find(Pool::Mechanic, "M5").unwrap().hours, 4.0);
    }

    #[test]
    fn test_duplicate_id_detection() {
        let team = Team::new(vec![Worker::new("M1", 8.0), Worker::new("M1", 4.0)], vec![]);
        assert_eq!(team.duplicate_id(), Some((Pool::Mechanic, "M1")));
        assert_eq!(Team::default_roster().duplicate_id(), None);
    }

    #[test]
    fn test_team_decodes_legacy_keys() {
        let raw = r#"{"meccanici":[{"id":"M1","hours":8}],"elettrauti":[{"id":"E1","hours":"6"}]}"#;
        let team: Team = serde_json::from_str(raw).unwrap();
        assert_eq!(team.mechanics, vec![Worker::new("M1", 8.0)]);
        assert_eq!(team.electricians, vec![Worker::new("E1", 6.0)]);
    }

    #[test]
    fn test_pool_from_str() {
        assert_eq!("Mechanic".parse::<Pool>().unwrap(), Pool::Mechanic);
        assert_eq!("e".parse::<Pool>().unwrap(), Pool::Electrical);
        assert!("welder".parse::<Pool>().is_err());
    }
}
