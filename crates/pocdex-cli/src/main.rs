//! Pocdex CLI - Command-line interface for pocdex
//!
//! Indexes a directory of per-vulnerability JSON files into a single
//! identifier to URL document, and answers questions about a saved one.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pocdex")]
#[command(author = "Pocdex Contributors")]
#[command(version)]
#[command(about = "Index per-vulnerability JSON files into an ID to URL map", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pocdex.json config file
    Init {
        /// Directory to write the config into (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Walk the repository and write the index
    Index {
        /// Repository to index (defaults to the configured root)
        path: Option<PathBuf>,

        /// Output file for the index JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base URL prepended to each file's relative path
        #[arg(long)]
        base_url: Option<String>,

        /// Required file name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Required file name suffix, trimmed to form the identifier
        #[arg(long)]
        suffix: Option<String>,

        /// Config file (defaults to ./pocdex.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Skip hidden entries and honor .gitignore files
        #[arg(long)]
        respect_ignore: bool,

        /// Walk in name order and write sorted keys
        #[arg(long)]
        sort: bool,
    },

    /// Print the URL recorded for an identifier
    Lookup {
        /// Identifier, e.g. CVE-2024-12345
        id: String,

        /// Index file to read
        #[arg(short, long, default_value = pocdex_core::DEFAULT_OUTPUT)]
        index: PathBuf,
    },

    /// Show entry counts of a saved index
    Stats {
        /// Index file to read
        #[arg(short, long, default_value = pocdex_core::DEFAULT_OUTPUT)]
        index: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Index {
            path,
            output,
            base_url,
            prefix,
            suffix,
            config,
            follow_symlinks,
            respect_ignore,
            sort,
        } => {
            let overrides = commands::IndexOverrides {
                root: path,
                output,
                base_url,
                prefix,
                suffix,
                follow_symlinks,
                respect_ignore,
                sort,
            };
            commands::index(config.as_deref(), overrides)
        }
        Commands::Lookup { id, index } => commands::lookup(&id, &index),
        Commands::Stats { index } => commands::stats(&index),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
