mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eclipse", about = "Solar eclipse stage logger")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show SER file metadata and sampling cadence
    Info(commands::info::InfoArgs),
    /// List (and optionally export) the frames a scan will classify
    Samples(commands::samples::SamplesArgs),
    /// Detect eclipse stage transitions in a video
    Scan(commands::scan::ScanArgs),
    /// Print the transition rule table
    Rules(commands::rules::RulesArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Samples(args) => commands::samples::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Rules(args) => commands::rules::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
