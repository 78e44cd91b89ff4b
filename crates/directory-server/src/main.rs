//! Directory server
//!
//! `serve` runs the JSON API; `seed` prints the sample directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directory_core::logging_facility::{self, Profile};
use directory_core::Directory;
use directory_server::config::{ServeArgs, ServeConfig};
use directory_server::http::{self, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Employee/department directory")]
struct Cli {
    /// Log output profile: development, production or test
    #[arg(
        long,
        global = true,
        env = "DIRECTORY_LOG_PROFILE",
        default_value = "development"
    )]
    log_profile: Profile,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Print the sample departments and employees as JSON.
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env file is normal
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    match cli.command {
        Command::Serve(args) => run_server(args.into()).await,
        Command::Seed => print_seed(),
    }
}

async fn run_server(config: ServeConfig) -> Result<()> {
    let directory = if config.seed {
        info!("loading sample directory");
        Directory::with_sample_data()
    } else {
        Directory::new()
    };
    http::serve(config, AppState::new(directory)).await
}

fn print_seed() -> Result<()> {
    let directory = Directory::with_sample_data();
    let departments = directory.list_department_summaries()?;
    let employees = directory.list_employees(None, None)?;
    let output = serde_json::json!({
        "departments": departments,
        "employees": employees,
    });
    let rendered = serde_json::to_string_pretty(&output).context("failed to render sample data")?;
    println!("{rendered}");
    Ok(())
}
