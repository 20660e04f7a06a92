//! Jobs: units of repair work and the skill roles they need.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::lenient_date;
use crate::domain::hours::{lenient_hours, sanitize_hours};
use crate::domain::team::Pool;
use crate::id::generate_job_id;

/// Separator between client and description in a job title.
pub const CLIENT_SEPARATOR: &str = " - ";

/// Title given to jobs created without one.
pub const DEFAULT_JOB_TITLE: &str = "New job";

/// Normalized client identifier derived from a job title.
///
/// Text before the first `" - "` (or the whole title), trimmed and lowercased.
pub fn client_key(title: &str) -> String {
    let client = match title.find(CLIENT_SEPARATOR) {
        Some(i) => &title[..i],
        None => title,
    };
    client.trim().to_lowercase()
}

/// Skill a job needs.
///
/// Both electrical variants gate the electrical phase identically; the
/// distinction is kept for display and round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[serde(alias = "meccanico")]
    Mechanic,
    #[serde(alias = "elettrauto")]
    ElectricalMandatory,
    #[serde(alias = "elettrauto_fac")]
    ElectricalOptional,
}

impl Role {
    /// Labor pool that serves this role.
    pub fn pool(&self) -> Pool {
        match self {
            Role::Mechanic => Pool::Mechanic,
            Role::ElectricalMandatory | Role::ElectricalOptional => Pool::Electrical,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mechanic" | "meccanico" | "m" => Ok(Role::Mechanic),
            "electrical-mandatory" | "electrical" | "elettrauto" | "e" => Ok(Role::ElectricalMandatory),
            "electrical-optional" | "elettrauto_fac" => Ok(Role::ElectricalOptional),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Mechanic => "mechanic",
            Role::ElectricalMandatory => "electrical-mandatory",
            Role::ElectricalOptional => "electrical-optional",
        };
        f.write_str(name)
    }
}

/// A unit of repair work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique, stable identifier
    pub id: String,

    /// "Client - Description"; the client part drives affinity
    #[serde(default)]
    pub title: String,

    /// Required hours (fractional allowed)
    #[serde(default, deserialize_with = "lenient_hours::deserialize")]
    pub hours: f64,

    /// Last day work may happen; `None` means the period end
    #[serde(default, with = "lenient_date")]
    pub deadline: Option<NaiveDate>,

    /// First day work may happen; `None` means the period start
    #[serde(default, alias = "ingress", with = "lenient_date")]
    pub arrival: Option<NaiveDate>,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub note: String,

    /// Vehicle/plate, display only
    #[serde(default)]
    pub plate: String,

    /// Hard pin to a mechanic
    #[serde(default)]
    pub locked_mechanic_id: Option<String>,

    /// Hard pin to an electrical technician
    #[serde(default)]
    pub locked_electric_id: Option<String>,
}

impl Job {
    /// Create a mechanic job with a generated id.
    pub fn new(title: &str, hours: f64) -> Self {
        Self::with_id(&generate_job_id(), title, hours)
    }

    /// Create a mechanic job with an explicit id.
    pub fn with_id(id: &str, title: &str, hours: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            hours,
            deadline: None,
            arrival: None,
            roles: vec![Role::Mechanic],
            note: String::new(),
            plate: String::new(),
            locked_mechanic_id: None,
            locked_electric_id: None,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_arrival(mut self, arrival: NaiveDate) -> Self {
        self.arrival = Some(arrival);
        self
    }

    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn with_plate(mut self, plate: &str) -> Self {
        self.plate = plate.to_string();
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    pub fn with_locked_mechanic(mut self, worker_id: &str) -> Self {
        self.locked_mechanic_id = Some(worker_id.to_string());
        self
    }

    pub fn with_locked_electrician(mut self, worker_id: &str) -> Self {
        self.locked_electric_id = Some(worker_id.to_string());
        self
    }

    pub fn client_key(&self) -> String {
        client_key(&self.title)
    }

    /// Hours of work, with invalid amounts read as zero.
    pub fn work_hours(&self) -> f64 {
        sanitize_hours(self.hours)
    }

    pub fn needs(&self, pool: Pool) -> bool {
        self.roles.iter().any(|r| r.pool() == pool)
    }

    /// Active hard lock for a pool; blank ids count as no lock.
    pub fn lock_for(&self, pool: Pool) -> Option<&str> {
        let lock = match pool {
            Pool::Mechanic => self.locked_mechanic_id.as_deref(),
            Pool::Electrical => self.locked_electric_id.as_deref(),
        };
        lock.map(str::trim).filter(|id| !id.is_empty())
    }

    /// Set or clear the hard lock for a pool.
    pub fn set_lock(&mut self, pool: Pool, worker_id: Option<&str>) {
        let value = worker_id.map(str::to_string);
        match pool {
            Pool::Mechanic => self.locked_mechanic_id = value,
            Pool::Electrical => self.locked_electric_id = value,
        }
    }
}
