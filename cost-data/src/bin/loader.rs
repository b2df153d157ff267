use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cost_core::db::{DbConfig, RepositoryRegistry};
use cost_data::ItemLoader;
use cost_db_json::JsonRepositoryFactory;
use cost_db_sqlite::SqliteRepositoryFactory;

/// Import catalog items from a CSV file.
///
/// The CSV file must have the columns
/// `nome,categoria,quantidade_base,tipo_quantidade,preco_por_quantidade`.
/// Items whose name already exists are replaced; the rest are created.
#[derive(Parser, Debug)]
#[command(name = "cost-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the items
    #[arg(short, long)]
    file: PathBuf,

    /// Storage backend (json or sqlite)
    #[arg(short, long, env = "COST_DB_BACKEND", default_value = "json")]
    backend: String,

    /// Catalog location: the JSON file or SQLite database path
    #[arg(short, long, env = "COST_DB", default_value = "data.json")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(JsonRepositoryFactory));
    registry.register(Box::new(SqliteRepositoryFactory));

    let config = DbConfig {
        backend: args.backend.clone(),
        connection_string: args.db.clone(),
    };
    let repo = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to open {} store: {}", args.backend, args.db))?;

    println!("Loading items from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ItemLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let summary = ItemLoader::load(repo.as_ref(), &records)
        .await
        .context("Failed to load items into the catalog")?;

    println!(
        "Created {} and updated {} items in {}.",
        summary.created, summary.updated, args.db
    );

    Ok(())
}
