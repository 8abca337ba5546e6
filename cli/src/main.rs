//! cms-tester - Contentful connection tester.
//!
//! Provides commands for:
//! - `configure`: Save delivery API credentials
//! - `status`: Test the stored credentials
//! - `fetch`: List published entries
//! - `content-types`: List content type descriptors
//! - `create-model`: Create predefined content types via the management API
//! - `clear`: Forget the stored credentials

mod commands;
mod error;
mod output;
mod render;
mod store;
mod transport;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use contentful_core::config::DELIVERY_BASE_URL;
use tracing_subscriber::EnvFilter;

use commands::{
    ClearArgs, ConfigureArgs, ContentTypesArgs, Context, CreateModelArgs, FetchArgs, StatusArgs,
};
use output::Output;
use store::{ConfigStore, DEFAULT_STORE_PATH};

/// cms-tester - Verify access to a Contentful space and browse its content.
#[derive(Parser)]
#[command(name = "cms-tester", version, about)]
struct Cli {
    /// Settings file holding the saved configuration.
    #[arg(long, global = true, env = "CMS_TESTER_STORE", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Content Delivery API root.
    #[arg(long, global = true, env = "CONTENTFUL_DELIVERY_URL", default_value = DELIVERY_BASE_URL)]
    delivery_url: String,

    /// Enable verbose output (debug logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save space credentials and test the connection.
    Configure(ConfigureArgs),
    /// Show the connection status for the saved credentials.
    Status(StatusArgs),
    /// Fetch and display published entries.
    Fetch(FetchArgs),
    /// List content type descriptors as JSON.
    ContentTypes(ContentTypesArgs),
    /// Create predefined content models in a space.
    CreateModel(CreateModelArgs),
    /// Remove the saved credentials.
    Clear(ClearArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::new(ConfigStore::new(cli.store), cli.delivery_url);
    let result = match cli.command {
        Commands::Configure(args) => args.execute(&ctx),
        Commands::Status(args) => args.execute(&ctx),
        Commands::Fetch(args) => args.execute(&ctx),
        Commands::ContentTypes(args) => args.execute(&ctx),
        Commands::CreateModel(args) => args.execute(&ctx),
        Commands::Clear(args) => args.execute(&ctx),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
