use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "globe-caps", author, version, about = "Project area caps onto a globe")]
pub struct Cli {
    /// Reference sphere radius in km (overrides the config file)
    #[arg(long, global = true)]
    pub radius: Option<f64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project the configured caps once and print a JSON report
    Project {
        #[command(flatten)]
        common: CommonArgs,

        /// Include world-space edges for every cap
        #[arg(long)]
        edges: bool,
    },

    /// Replay a command script through the frame loop
    Session {
        /// JSON command script
        #[arg(long)]
        script: PathBuf,

        /// Minimum number of frames to run
        #[arg(long, default_value_t = 1)]
        frames: u64,

        #[command(flatten)]
        common: CommonArgs,

        /// Include world-space edges for every cap
        #[arg(long)]
        edges: bool,
    },
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON config file (built-in defaults when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
}
