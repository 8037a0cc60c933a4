use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod camera;
mod cli;
mod config;
mod report;
mod session;
mod viewer;

use cli::{Cli, Command, CommonArgs};
use config::{Config, ConfigError};
use report::Report;
use session::{Script, SessionError, run_session};
use viewer::Viewer;

#[derive(Debug)]
enum AppError {
    Config(ConfigError),
    Session(SessionError),
    Encode(serde_json::Error),
    Write { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "{err}"),
            AppError::Session(err) => write!(f, "{err}"),
            AppError::Encode(err) => write!(f, "encode report: {err}"),
            AppError::Write { path, source } => write!(f, "write {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = real_main(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout is reserved for the report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Project { common, edges } => {
            let viewer = open_viewer(&common, cli.radius)?;
            write_report(&Report::capture(&viewer, edges), common.output.as_deref())
        }
        Command::Session {
            script,
            frames,
            common,
            edges,
        } => {
            let script = Script::load(&script)?;
            let mut viewer = open_viewer(&common, cli.radius)?;
            run_session(&mut viewer, &script, frames)?;
            write_report(&Report::capture(&viewer, edges), common.output.as_deref())
        }
    }
}

fn open_viewer(common: &CommonArgs, radius: Option<f64>) -> Result<Viewer, ConfigError> {
    let config = Config::load_or_default(common.config.as_deref())?.with_radius(radius)?;
    Viewer::new(&config, common.width, common.height)
}

fn write_report(report: &Report, output: Option<&Path>) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report).map_err(AppError::Encode)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n").map_err(|source| AppError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), caps = report.caps.len(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
