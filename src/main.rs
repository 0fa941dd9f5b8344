//! desksearch CLI
//!
//! Command-line interface for searching help-desk data:
//! - Interactive search shell (default)
//! - One-shot searches with text or JSON output
//! - Schema and loaded record type listing
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use desksearch::config::{generate_default_config, Config, LoggingConfig};
use desksearch::shell::{render, Shell};
use desksearch::{open_repository, Repository, Schema};
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "desksearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search users, organizations and tickets")]
#[command(long_about = "desksearch loads users, organizations and tickets from JSON files into an
in-memory index and searches any field, showing related records with each hit.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding users.json, organizations.json and tickets.json
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive search shell
    Shell,

    /// Run a single search
    Search {
        /// Record type (users, organizations, tickets)
        record: String,
        /// Field to search
        field: String,
        /// Value to match; empty matches missing values
        value: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List searchable fields of a record type
    Fields {
        /// Record type (users, organizations, tickets)
        record: String,
    },

    /// List the record types that were loaded
    Types,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    init_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let repo = open(&config)?;
            let stdin = io::stdin();
            let mut shell = Shell::new(repo, stdin.lock(), io::stdout());
            shell.run()?;
        }

        Commands::Search {
            record,
            field,
            value,
            format,
        } => {
            let repo = open(&config)?;
            let record_type = repo.record_type(&record)?;
            let results = repo.search_resolved(record_type, &field, &Value::String(value))?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                Format::Text if results.is_empty() => println!("No results found."),
                Format::Text => {
                    println!("Found {} search results.", results.len());
                    for result in &results {
                        print!("{}", render(result));
                    }
                }
            }
        }

        Commands::Fields { record } => {
            let schema = Schema::lookup(&record)?;
            println!("{:<30} {}", "Field", "Type");
            println!("{}", "-".repeat(45));
            for field in schema.fields() {
                let marker = if field.primary_key { " (primary key)" } else { "" };
                println!("{:<30} {}{}", field.name, field.type_tag, marker);
            }
        }

        Commands::Types => {
            let repo = open(&config)?;
            for &record_type in repo.available_record_types() {
                let count = repo.store().record_count(record_type);
                println!("{:<15} {} records", record_type, count);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", content);
            }
        }
    }

    Ok(())
}

fn open(config: &Config) -> anyhow::Result<Repository> {
    let paths = config.data.paths();
    tracing::info!("Data directory: {:?}", config.data.data_dir);

    open_repository(&paths)
        .with_context(|| format!("Sorry, unable to load the data in {:?}", config.data.data_dir))
}

/// Logs go to stderr so they never mix with search output
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("desksearch={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
