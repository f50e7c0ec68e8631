use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gapshield", version, about = "Gapshield CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect daily privacy-gap schedules
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Decide whether a capture must be suppressed
    Check(commands::check::CheckArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate a secret key for keyed schedule seeding
    Keygen(commands::keygen::KeygenArgs),
}

fn main() {
    gapshield_core::telemetry::init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Check(args) => commands::check::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Keygen(args) => commands::keygen::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
