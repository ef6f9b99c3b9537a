use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayoff-cli", version, about = "Day Off Drop CLI")]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a day off by dropping the ball (or spinning the wheel)
    Play(commands::play::PlayArgs),
    /// List the Mondays and Fridays of a month
    Days(commands::days::DaysArgs),
    /// List the federal holidays observed in a year
    Holidays(commands::holidays::HolidaysArgs),
    /// Print the add-to-calendar link for a date
    Link(commands::link::LinkArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args, config),
        Commands::Days(args) => commands::days::run(args),
        Commands::Holidays(args) => commands::holidays::run(args),
        Commands::Link(args) => commands::link::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
