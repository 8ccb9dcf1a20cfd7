use betterterp_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "betterterp", version, about = "BetterTerp CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today at a glance: affirmation, streak, habits
    Home {
        #[arg(long)]
        json: bool,
    },
    /// Account registration and sign-in
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Daily habit checklist
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Current streak
    Streak {
        #[arg(long)]
        json: bool,
    },
    /// Daily affirmations
    Affirmation {
        #[command(subcommand)]
        action: commands::affirmation::AffirmationAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let default_level = Config::load_or_default().log.level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Home { json } => commands::home::run(json),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Streak { json } => commands::streak::run(json),
        Commands::Affirmation { action } => commands::affirmation::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
