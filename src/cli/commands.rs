//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - init: create the snapshot of a period
//! - plan/report/capacity/risks: run the scheduler and show the result
//! - job/team: edit the snapshot
//! - reassign/duplicate-week/export/import: overrides and exchange

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use officina::calendar::parse_date;
use officina::domain::{Pool, Role};

/// Officina - work-order scheduler for a repair shop
#[derive(Parser, Debug)]
#[command(name = "officina")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// First day of the period (defaults to the latest stored period)
    #[arg(long, global = true, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the period
    #[arg(long, global = true, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty snapshot for a period using the configured team
    Init,

    /// Run the scheduler and print the plan
    Plan {
        /// Only schedule jobs of this client
        #[arg(long)]
        client: Option<String>,
    },

    /// Run the scheduler and write the printable report
    Report {
        /// Only schedule jobs of this client
        #[arg(long)]
        client: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show used and free hours per day and pool
    Capacity,

    /// Show jobs that do not fit in their window
    Risks,

    /// List the clients of the current jobs
    Clients,

    /// Job editing
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Team editing
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Move an allocated job to another worker
    Reassign {
        /// Job id
        #[arg(long)]
        job: String,

        /// Day of the allocation
        #[arg(long, value_parser = parse_date)]
        day: NaiveDate,

        /// Pool of the allocation (mechanic, electrical)
        #[arg(long)]
        role: Pool,

        /// Worker taking over
        #[arg(long)]
        worker: String,

        /// Also pin the job to the worker
        #[arg(long)]
        lock: bool,
    },

    /// Move the period one week forward
    DuplicateWeek {
        /// Move deadlines along with the period
        #[arg(long)]
        shift_deadlines: bool,
    },

    /// Export the snapshot as JSON
    Export {
        /// Target file (defaults to officina_planner_<start>_<end>.json)
        file: Option<PathBuf>,
    },

    /// Import a JSON snapshot and store it
    Import {
        /// Source file
        file: PathBuf,
    },
}

/// Job subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum JobCommands {
    /// Add a job (defaults: 1h, whole period, mechanic)
    Add {
        /// "Client - Description"
        title: Option<String>,

        /// Required hours
        #[arg(long, default_value_t = 1.0)]
        hours: f64,

        /// First workable day
        #[arg(long, value_parser = parse_date)]
        arrival: Option<NaiveDate>,

        /// Last workable day
        #[arg(long, value_parser = parse_date)]
        deadline: Option<NaiveDate>,

        /// Roles, comma separated (mechanic, electrical-mandatory, electrical-optional)
        #[arg(long, value_delimiter = ',')]
        roles: Vec<Role>,

        /// Vehicle/plate
        #[arg(long)]
        plate: Option<String>,

        /// Free text note
        #[arg(long)]
        note: Option<String>,
    },

    /// Remove a job
    Remove {
        /// Job id
        id: String,
    },

    /// List jobs
    List,

    /// Pin a job to a worker of a pool
    Lock {
        /// Job id
        id: String,

        /// Pool (mechanic, electrical)
        #[arg(long)]
        role: Pool,

        /// Worker id
        #[arg(long)]
        worker: String,
    },

    /// Clear the lock of a job in a pool
    Unlock {
        /// Job id
        id: String,

        /// Pool (mechanic, electrical)
        #[arg(long)]
        role: Pool,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TeamCommands {
    /// Add a worker to a pool
    Add {
        /// Pool (mechanic, electrical)
        role: Pool,

        /// Worker id
        id: String,

        /// Daily hours
        #[arg(long, default_value_t = 8.0)]
        hours: f64,
    },

    /// Remove a worker from a pool
    Remove {
        /// Pool (mechanic, electrical)
        role: Pool,

        /// Worker id
        id: String,
    },

    /// Change the daily hours of a worker
    SetHours {
        /// Pool (mechanic, electrical)
        role: Pool,

        /// Worker id
        id: String,

        /// Daily hours
        hours: f64,
    },

    /// List both pools
    List,
}
