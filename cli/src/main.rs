//! Terminal admin for the product catalog.

mod commands;
mod output;

use std::process;

use agua_core::{ProductApi, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{CreateArgs, EditArgs};
use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "agua", about = "Product catalog admin", long_about = None)]
struct Cli {
    /// Product API base URL, including the `/api` prefix
    #[arg(long, global = true, env = "AGUA_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every product
    List,
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Create a product
    Create(CreateArgs),
    /// Change some fields of a product
    Edit(EditArgs),
    /// Delete a product
    Delete {
        /// Product id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let api = ProductApi::connect(&cli.api_url);
    match cli.command {
        Command::List => commands::list(&api, cli.format),
        Command::Show { id } => commands::show(&api, &id, cli.format),
        Command::Create(args) => commands::create(&api, args, cli.format),
        Command::Edit(args) => commands::edit(&api, args, cli.format),
        Command::Delete { id, yes } => commands::delete(&api, &id, yes),
    }
}

fn main() {
    init_logging();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("✗ {error:#}");
        process::exit(1);
    }
}
