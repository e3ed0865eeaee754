//! Command-line player for Tale stories.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tale_fiction::VocabularyScope;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tale",
    about = "Tale: play interactive fiction from JSON story files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log interpreter decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story file (JSON)
        file: PathBuf,

        /// Which objects commands may name: story, or location (alias room)
        #[arg(long, default_value = "story", value_parser = parse_scope)]
        scope: VocabularyScope,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Load a story and report what it contains
    Check {
        /// Story file (JSON)
        file: PathBuf,
    },

    /// List every object with its owner
    Objects {
        /// Story file (JSON)
        file: PathBuf,
    },
}

fn parse_scope(s: &str) -> Result<VocabularyScope, String> {
    VocabularyScope::parse(s)
        .ok_or_else(|| format!("unknown scope '{s}' (expected story or location)"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play {
            file,
            scope,
            no_color,
        } => commands::play::run(&file, scope, no_color),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Objects { file } => commands::objects::run(&file),
    }
}
