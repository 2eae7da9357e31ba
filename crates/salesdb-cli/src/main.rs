//! SalesDB CLI
//!
//! Command-line interface over the department and seller DAOs

use clap::{Parser, Subcommand, ValueEnum};
use salesdb_core::logging_facility::{init_with_filter, Profile};
use std::path::PathBuf;

mod commands;

/// Lifecycle events are info level; keep them off the terminal unless
/// `RUST_LOG` asks for them.
const CLI_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "salesdb")]
#[command(about = "SalesDB - Departments and sellers over SQLite", long_about = None)]
struct Cli {
    /// Database url (file path, sqlite:<path>, or :memory:); overrides configuration
    #[arg(long, global = true)]
    db: Option<String>,

    /// Configuration file (.properties, .ini, .toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the tables (and optionally the demo data)
    Init(commands::init::InitArgs),
    /// Department operations
    Department(commands::department::DepartmentArgs),
    /// Seller operations
    Seller(commands::seller::SellerArgs),
}

fn main() {
    let cli = Cli::parse();

    let profile = match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    };
    init_with_filter(profile, CLI_LOG_FILTER);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::load(cli.config.as_deref(), cli.db.as_deref(), cli.json)?;

    match cli.command {
        Commands::Init(args) => commands::init::execute(&ctx, args),
        Commands::Department(args) => commands::department::execute(&ctx, args),
        Commands::Seller(args) => commands::seller::execute(&ctx, args),
    }
}
