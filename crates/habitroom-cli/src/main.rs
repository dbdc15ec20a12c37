use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitroom-cli", version, about = "Habitroom CLI")]
struct Cli {
    /// Habit key to operate on (defaults to habit.key from config)
    #[arg(long, global = true)]
    habit: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current streak for the habit
    Status {
        /// Reference day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Status and run position of a single day
    Day {
        /// Day (YYYY-MM-DD)
        date: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Every day of a month with its marker and run position
    Month {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a break on a day
    Break {
        /// Day (YYYY-MM-DD)
        date: String,
        /// Reason from the configured list (see `reasons`)
        reason: String,
        /// Description, required when the reason is the "other" option
        #[arg(long)]
        note: Option<String>,
    },
    /// Undo a recorded break
    Undo {
        /// Day (YYYY-MM-DD)
        date: String,
    },
    /// List configured break reasons
    Reasons,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    // HABITROOM_LOG=debug shows ledger loads and no-op undos
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("HABITROOM_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let habit = cli.habit.as_deref();
    let result = match cli.command {
        Commands::Status { today, json } => commands::status::run(habit, today.as_deref(), json),
        Commands::Day { date, json } => commands::day::run_day(habit, &date, json),
        Commands::Month { month, json } => commands::day::run_month(habit, month.as_deref(), json),
        Commands::Break { date, reason, note } => {
            commands::mark::run_break(habit, &date, &reason, note.as_deref())
        }
        Commands::Undo { date } => commands::mark::run_undo(habit, &date),
        Commands::Reasons => commands::mark::run_reasons(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
