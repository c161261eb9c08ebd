use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "mindguard", version, about = "MindGuard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a daily check-in and get a stress assessment
    Checkin(commands::checkin::CheckinArgs),
    /// Show the current streak and reward points
    Streak {
        /// User to inspect (defaults to checkin.default_user)
        #[arg(long)]
        user: Option<String>,
    },
    /// List past stress reports, newest first
    History(commands::history::HistoryArgs),
    /// Summarise stress per day
    Trend(commands::history::HistoryArgs),
    /// Ask the conversational companion
    Ask {
        /// Free-text message
        message: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINDGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Streak { user } => commands::streak::run(user),
        Commands::History(args) => commands::history::run_history(args),
        Commands::Trend(args) => commands::history::run_trend(args),
        Commands::Ask { message } => commands::ask::run(&message),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
