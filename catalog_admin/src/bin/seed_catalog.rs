// Seed the product catalog from a JSON file
//
// Usage: seed_catalog [path/to/products.json]
//
// Creates the schema when missing and inserts the file's products only when
// the catalog is empty. The path defaults to CATALOG_SEED_FILE.

use anyhow::Context;
use catalog_admin::config::AppConfig;
use catalog_admin::web_app::api::{db, PgProductStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let seed_file = std::env::args().nth(1).unwrap_or_else(|| config.seed_file.clone());

    let pool = db::create_pool(&config)
        .await
        .context("Failed to connect to the database")?;
    db::ensure_schema(&pool, &config.schema).await?;

    let store = PgProductStore::new(pool, config.schema.clone());
    let products = db::load_seed_file(&seed_file).with_context(|| format!("Failed to read {}", seed_file))?;
    tracing::info!("Loaded {} products from {}", products.len(), seed_file);

    let created = db::seed_if_empty(&store, products).await?;
    let total = store.count().await?;
    println!("✅ Seeded {} products ({} in {}.delivery_products)", created, total, config.schema);

    Ok(())
}
