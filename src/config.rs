//! Configuration for Officina.
//!
//! Loaded from `--config`, `./.officina.yml` or `~/.config/officina/officina.yml`,
//! falling back to defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::Period;
use crate::domain::Team;
use crate::error::PlannerError;
use crate::scheduler::PlannerOptions;
use crate::storage::SnapshotStore;

/// Default length of a freshly created period, Monday to Saturday.
pub const DEFAULT_PERIOD_DAYS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Where period snapshots live.
    pub storage: StorageConfig,

    /// Scheduling behaviour and period defaults.
    pub planner: PlannerConfig,

    /// Roster used when a new period is created.
    pub team: Team,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            planner: PlannerConfig::default(),
            team: Team::default_roster(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .officina.yml in current directory
    /// 3. ~/.config/officina/officina.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".officina.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .officina.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .officina.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("officina").join("officina.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.planner.period_days == 0 {
            return Err(PlannerError::Config("planner.period-days must be > 0".to_string()));
        }
        if let Some((pool, id)) = self.team.duplicate_id() {
            return Err(PlannerError::Config(format!("team has duplicate {} id {}", pool, id)));
        }
        Ok(())
    }

    /// Open the snapshot store this config points at.
    pub fn open_store(&self) -> crate::Result<SnapshotStore> {
        SnapshotStore::open(&self.storage.dir)
    }

    /// A period of the configured length starting on `start`.
    pub fn default_period(&self, start: chrono::NaiveDate) -> crate::Result<Period> {
        Period::starting_at(start, self.planner.period_days)
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot directory.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: SnapshotStore::default_dir(),
        }
    }
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    #[serde(flatten)]
    pub options: PlannerOptions,

    /// Days in a new period.
    #[serde(rename = "period-days")]
    pub period_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            options: PlannerOptions::default(),
            period_days: DEFAULT_PERIOD_DAYS,
        }
    }
}
