//! Command handlers: load the period snapshot, act on it, save it back.

use colored::*;
use eyre::{Context, Result, bail, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;

use officina::calendar::{Period, format_date};
use officina::config::Config;
use officina::domain::{Pool, Snapshot, Worker};
use officina::overrides;
use officina::report::{self, group_by_day};
use officina::scheduler::{Planner, Schedule};
use officina::storage::{SnapshotStore, export_file_name, export_snapshot, import_snapshot};

use super::commands::{Cli, Commands, JobCommands, TeamCommands};

/// Resolved state shared by every command.
pub struct Session {
    config: Config,
    store: SnapshotStore,
    period: Option<Period>,
}

impl Session {
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let store = config.open_store().context("Failed to open snapshot store")?;
        let period = match (cli.from, cli.to) {
            (Some(start), Some(end)) => Some(Period::new(start, end)),
            (Some(start), None) => Some(config.default_period(start)?),
            (None, Some(_)) => bail!("--to requires --from"),
            (None, None) => None,
        };
        Ok(Self { config, store, period })
    }

    /// The snapshot of the selected period, or the latest stored one.
    fn load(&self) -> Result<Snapshot> {
        let snapshot = match &self.period {
            Some(period) => self.store.load(period)?,
            None => self.store.latest()?,
        };
        match snapshot {
            Some(snapshot) => Ok(snapshot),
            None => {
                let which = self.period.map_or_else(|| "any period".to_string(), |p| p.to_string());
                bail!("No snapshot for {}, run `officina init` first", which)
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.store.save(snapshot).context("Failed to save snapshot")?;
        info!("Snapshot saved to {}", path.display());
        Ok(())
    }

    fn planner(&self) -> Planner {
        Planner::new().with_options(self.config.planner.options)
    }

    /// Run the scheduler; with `persist`, keep the affinity it learned.
    fn run(&self, snapshot: &mut Snapshot, client: Option<&str>, persist: bool) -> Result<Schedule> {
        let schedule = self.planner().schedule_snapshot(snapshot, client);
        if persist && schedule.affinity != snapshot.client_affinity {
            snapshot.client_affinity = schedule.affinity.clone();
            self.save(snapshot)?;
        }
        Ok(schedule)
    }
}

pub fn run_command(cli: &Cli, session: &Session) -> Result<()> {
    match &cli.command {
        Commands::Init => handle_init(session),
        Commands::Plan { client } => handle_plan(session, client.as_deref()),
        Commands::Report { client, output } => handle_report(session, client.as_deref(), output.as_ref()),
        Commands::Capacity => handle_capacity(session),
        Commands::Risks => handle_risks(session),
        Commands::Clients => handle_clients(session),
        Commands::Job { command } => handle_job(session, command),
        Commands::Team { command } => handle_team(session, command),
        Commands::Reassign {
            job,
            day,
            role,
            worker,
            lock,
        } => handle_reassign(session, job, *day, *role, worker, *lock),
        Commands::DuplicateWeek { shift_deadlines } => handle_duplicate_week(session, *shift_deadlines),
        Commands::Export { file } => handle_export(session, file.as_ref()),
        Commands::Import { file } => handle_import(session, file),
    }
}

fn handle_init(session: &Session) -> Result<()> {
    let period = match session.period {
        Some(period) => period,
        None => session
            .config
            .default_period(chrono::Local::now().date_naive())
            .context("Failed to build default period")?,
    };
    if session.store.load(&period)?.is_some() {
        bail!("A snapshot for {} already exists", period);
    }
    let snapshot = Snapshot::new(period, session.config.team.clone());
    session.save(&snapshot)?;
    println!("{} {}", "Created period".green(), period);
    Ok(())
}

fn handle_plan(session: &Session, client: Option<&str>) -> Result<()> {
    let mut snapshot = session.load()?;
    let schedule = session.run(&mut snapshot, client, true)?;
    info!(
        "Planned {} allocations, {} risks for {}",
        schedule.allocations.len(),
        schedule.risks.len(),
        schedule.period
    );

    println!("{} {}", "Plan".bold(), schedule.period);
    for plan in group_by_day(&schedule) {
        println!("\n{}", format_date(plan.day).cyan().bold());
        for pool in Pool::ALL {
            let loads = plan.pool(pool);
            if loads.is_empty() {
                continue;
            }
            println!("  {}", pool.label().dimmed());
            for load in loads {
                println!("    {:<6} {:>6.2}h", load.worker_id, load.hours());
                for a in &load.allocations {
                    let title = snapshot.job(&a.job_id).map_or(a.job_id.as_str(), |j| j.title.as_str());
                    println!("           {:>6.2}h  {}", a.hours, title);
                }
            }
        }
    }
    print_risks(&schedule);
    Ok(())
}

fn handle_report(session: &Session, client: Option<&str>, output: Option<&PathBuf>) -> Result<()> {
    let mut snapshot = session.load()?;
    let schedule = session.run(&mut snapshot, client, true)?;
    let text = report::render_text(&schedule, &snapshot.jobs);
    match output {
        Some(path) => {
            fs::write(path, text).context(format!("Failed to write report to {}", path.display()))?;
            println!("{} {}", "Report written to".green(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn handle_capacity(session: &Session) -> Result<()> {
    let mut snapshot = session.load()?;
    let schedule = session.run(&mut snapshot, None, false)?;
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10}",
        "Day", "Mech used", "Mech free", "Elec used", "Elec free"
    );
    for day in &schedule.capacity {
        let line = format!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            format_date(day.day),
            day.mechanic.used(),
            day.mechanic.free,
            day.electrical.used(),
            day.electrical.free
        );
        if day.mechanic.free <= 0.0 && day.electrical.free <= 0.0 {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

fn handle_risks(session: &Session) -> Result<()> {
    let mut snapshot = session.load()?;
    let schedule = session.run(&mut snapshot, None, false)?;
    print_risks(&schedule);
    Ok(())
}

fn print_risks(schedule: &Schedule) {
    if schedule.risks.is_empty() {
        println!("\n{}", "All jobs fit in their window".green());
        return;
    }
    println!("\n{}", "At risk".red().bold());
    for risk in &schedule.risks {
        println!("  {:<24} {:>6.2}h missing  {}", risk.job_id, risk.remaining, risk.title);
    }
}

fn handle_clients(session: &Session) -> Result<()> {
    let snapshot = session.load()?;
    let clients = snapshot.clients();
    for client in &clients {
        match snapshot.client_affinity.preferred(client) {
            Some(worker) => println!("{:<24} {}", client, worker.cyan()),
            None => println!("{}", client),
        }
    }
    let idle: Vec<_> = snapshot
        .client_affinity
        .iter()
        .filter(|(client, _)| !clients.iter().any(|c| c.as_str() == *client))
        .collect();
    if !idle.is_empty() {
        println!("\n{}", "Remembered, no open jobs".dimmed());
        for (client, worker) in idle {
            println!("{:<24} {}", client.dimmed(), worker);
        }
    }
    Ok(())
}

fn handle_job(session: &Session, command: &JobCommands) -> Result<()> {
    let mut snapshot = session.load()?;
    match command {
        JobCommands::Add {
            title,
            hours,
            arrival,
            deadline,
            roles,
            plate,
            note,
        } => {
            let mut job = snapshot.draft_job(title.as_deref());
            job.hours = *hours;
            if let Some(arrival) = arrival {
                job.arrival = Some(*arrival);
            }
            if let Some(deadline) = deadline {
                job.deadline = Some(*deadline);
            }
            if !roles.is_empty() {
                job.roles = roles.clone();
            }
            job.plate = plate.clone().unwrap_or_default();
            job.note = note.clone().unwrap_or_default();
            let id = job.id.clone();
            snapshot.add_job(job)?;
            session.save(&snapshot)?;
            println!("{} {}", "Added job".green(), id);
        }
        JobCommands::Remove { id } => {
            let job = snapshot.remove_job(id)?;
            session.save(&snapshot)?;
            println!("{} {} ({})", "Removed job".yellow(), job.id, job.title);
        }
        JobCommands::List => {
            for job in &snapshot.jobs {
                let roles: Vec<String> = job.roles.iter().map(|r| r.to_string()).collect();
                let window = format!(
                    "{} .. {}",
                    job.arrival.map_or_else(|| "-".to_string(), format_date),
                    job.deadline.map_or_else(|| "-".to_string(), format_date)
                );
                println!(
                    "{:<24} {:>6.2}h  {:<24} [{}]  {}",
                    job.id,
                    job.hours,
                    window,
                    roles.join(","),
                    job.title
                );
                for pool in Pool::ALL {
                    if let Some(worker) = job.lock_for(pool) {
                        println!("{:>26} {} locked to {}", "", pool, worker.cyan());
                    }
                }
            }
        }
        JobCommands::Lock { id, role, worker } => {
            if snapshot.team.find(*role, worker).is_none() {
                bail!("No {} worker named {}", role, worker);
            }
            snapshot.job_mut(id)?.set_lock(*role, Some(worker));
            session.save(&snapshot)?;
            println!("{} {} to {}", "Locked".green(), id, worker);
        }
        JobCommands::Unlock { id, role } => {
            overrides::unlock(&mut snapshot, id, *role)?;
            session.save(&snapshot)?;
            println!("{} {} ({})", "Unlocked".green(), id, role);
        }
    }
    Ok(())
}

fn handle_team(session: &Session, command: &TeamCommands) -> Result<()> {
    let mut snapshot = session.load()?;
    match command {
        TeamCommands::Add { role, id, hours } => {
            snapshot.team.add_worker(*role, Worker::new(id, *hours))?;
            session.save(&snapshot)?;
            println!("{} {} to {}", "Added".green(), id, role);
        }
        TeamCommands::Remove { role, id } => {
            snapshot.team.remove_worker(*role, id)?;
            session.save(&snapshot)?;
            println!("{} {} from {}", "Removed".yellow(), id, role);
        }
        TeamCommands::SetHours { role, id, hours } => {
            snapshot.team.set_hours(*role, id, *hours)?;
            session.save(&snapshot)?;
            println!("{} {} to {:.2}h", "Set".green(), id, hours);
        }
        TeamCommands::List => {
            for pool in Pool::ALL {
                println!("{} ({:.2}h/day)", pool.label().bold(), snapshot.team.total_hours(pool));
                for worker in snapshot.team.pool(pool) {
                    println!("  {:<8} {:>5.2}h", worker.id, worker.capacity());
                }
            }
        }
    }
    Ok(())
}

fn handle_reassign(
    session: &Session,
    job_id: &str,
    day: chrono::NaiveDate,
    pool: Pool,
    worker: &str,
    lock: bool,
) -> Result<()> {
    let mut snapshot = session.load()?;
    let schedule = session.planner().schedule_snapshot(&snapshot, None);
    let allocation = schedule
        .find_allocation(job_id, day, pool)
        .cloned()
        .ok_or_else(|| eyre!("Job {} has no {} allocation on {}", job_id, pool, format_date(day)))?;

    snapshot.client_affinity = schedule.affinity;
    overrides::reassign(&mut snapshot, &allocation, worker, lock)?;
    session.save(&snapshot)?;
    println!(
        "{} {} from {} to {}{}",
        "Reassigned".green(),
        job_id,
        allocation.worker_id,
        worker,
        if lock { " (locked)" } else { "" }
    );
    Ok(())
}

fn handle_duplicate_week(session: &Session, shift_deadlines: bool) -> Result<()> {
    let mut snapshot = session.load()?;
    let from = snapshot.period();
    snapshot.duplicate_week(shift_deadlines)?;
    if session.store.load(&snapshot.period())?.is_some() {
        bail!("A snapshot for {} already exists", snapshot.period());
    }
    session.save(&snapshot)?;
    println!("{} {} to {}", "Copied".green(), from, snapshot.period());
    Ok(())
}

fn handle_export(session: &Session, file: Option<&PathBuf>) -> Result<()> {
    let snapshot = session.load()?;
    let path = file.cloned().unwrap_or_else(|| PathBuf::from(export_file_name(&snapshot)));
    export_snapshot(&snapshot, &path).context(format!("Failed to export to {}", path.display()))?;
    println!("{} {}", "Exported to".green(), path.display());
    Ok(())
}

fn handle_import(session: &Session, file: &PathBuf) -> Result<()> {
    let snapshot = import_snapshot(file).context(format!("Failed to import {}", file.display()))?;
    session.save(&snapshot)?;
    println!(
        "{} {} jobs for {}",
        "Imported".green(),
        snapshot.jobs.len(),
        snapshot.period()
    );
    Ok(())
}
