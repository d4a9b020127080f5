//! gradebook CLI — interactive menu and reports over the academic records engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod menu;

use commands::list::ListKind;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Academic records registry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default when no command is given)
    Shell {
        /// Roster file or directory to preload
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a course report with low performers
    Report {
        /// Roster file or directory
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Course code
        #[arg(long)]
        course: String,

        /// Low-performer threshold in percent (default from config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List professors, students or courses in a roster
    List {
        /// Roster file or directory
        #[arg(long)]
        roster: PathBuf,

        /// What to list
        #[arg(value_enum)]
        kind: ListKind,
    },

    /// Validate roster TOML files
    Validate {
        /// Path to roster file or directory
        #[arg(long)]
        roster: PathBuf,
    },

    /// Create starter config and example roster
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gradebook_core=warn,gradebook=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Shell {
        roster: None,
        config: None,
    });

    let result = match command {
        Commands::Shell { roster, config } => commands::shell::execute(roster, config),
        Commands::Report {
            roster,
            course,
            threshold,
            format,
            config,
        } => commands::report::execute(roster, course, threshold, format, config),
        Commands::List { roster, kind } => commands::list::execute(roster, kind),
        Commands::Validate { roster } => commands::validate::execute(roster),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
