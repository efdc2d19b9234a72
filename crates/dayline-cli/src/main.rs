use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dayline_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "dayline", version, about = "Dayline CLI")]
struct Cli {
    /// User whose profile to act on (defaults to config `user_id`)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Habit catalog JSON file (defaults to `<data dir>/habits.json`)
    #[arg(long, global = true)]
    habits: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed schedule setup
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Daily timeline views
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Habit placement
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    logging::init(&config.logging.level);

    let ctx = commands::Context::new(config, cli.user, cli.habits);
    tracing::debug!(user_id = ctx.user_id(), "dispatching command");
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(&ctx, action),
        Commands::Timeline { action } => commands::timeline::run(&ctx, action),
        Commands::Habit { action } => commands::habit::run(&ctx, action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
