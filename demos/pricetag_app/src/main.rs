// demos/pricetag_app/src/main.rs

mod config;
mod console;
mod db;
mod errors;
mod screens;
mod state;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::state::AppState;

use clap::{Parser, Subcommand};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pricetag_app")]
#[command(about = "Scan barcodes into the price tracker", long_about = None)]
struct Cli {
  /// Write logs as JSON lines.
  #[arg(long, global = true)]
  json_logs: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Scan barcodes and open the matching products until input ends
  Lookup,
  /// Scan a barcode, fill the product from the open catalog and save it
  CreateProduct {
    /// Name to use when the catalog has none
    #[arg(long)]
    name: Option<String>,
    /// Print the filled form without saving
    #[arg(long)]
    dry_run: bool,
  },
  /// Scan a product and record a purchase of it
  CreatePurchase {
    #[arg(long)]
    store: String,
    #[arg(long)]
    price: String,
    #[arg(long)]
    promotion: bool,
  },
  /// Show the price evolution of a product
  History {
    product_id: String,
    #[arg(long)]
    json: bool,
  },
}

fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // RUST_LOG overrides the INFO default
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  init_tracing(cli.json_logs);

  if let Err(e) = run(cli).await {
    tracing::error!(error = %e, "pricetag_app failed.");
    std::process::exit(e.exit_code());
  }
}

async fn run(cli: Cli) -> AppResult<()> {
  let app_config = Arc::new(AppConfig::from_env()?);

  let db_pool = PgPool::connect(&app_config.database_url).await?;
  tracing::info!("Successfully connected to the database.");

  let app_state = AppState::new(app_config, db_pool)?;

  match cli.command {
    Commands::Lookup => screens::lookup(&app_state).await,
    Commands::CreateProduct { name, dry_run } => screens::create_product(&app_state, name, dry_run).await,
    Commands::CreatePurchase { store, price, promotion } => {
      screens::create_purchase(&app_state, store, price, promotion).await
    }
    Commands::History { product_id, json } => screens::history(&app_state, product_id, json).await,
  }
}
