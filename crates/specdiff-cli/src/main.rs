//! specdiff CLI
//!
//! Command-line interface for detecting breaking changes between two
//! OpenAPI / Swagger documents

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::Outcome;

#[derive(Debug, Parser)]
#[command(name = "specdiff")]
#[command(about = "specdiff - OpenAPI breaking change detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare an old and a new API description
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    match result {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::ThresholdReached) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
