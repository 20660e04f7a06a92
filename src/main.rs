use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::handlers::{Session, run_command};
use officina::config::Config;

fn setup_logging(verbose: bool) -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("officina")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("officina.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(log_file)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = setup_logging(cli.is_verbose()).context("Failed to setup logging")?;
    if cli.is_verbose() {
        println!("{} {}", "Logging to".yellow(), log_file.display());
    }

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Starting with config from: {:?}", cli.config);

    let session = Session::new(&cli, config)?;
    run_command(&cli, &session).context("Command failed")?;

    Ok(())
}
