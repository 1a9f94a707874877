// web_app/api/db.rs - Connection pool, schema bootstrap and the global store
//
// Server functions resolve their `PgProductStore` from here when it is not
// provided through Leptos context or actix app data.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Mutex;
use std::sync::OnceLock;

use super::queries::PgProductStore;
use crate::catalog::model::ProductFields;
use crate::catalog::store::{ProductStore, StoreError};
use crate::config::AppConfig;
use crate::fixtures::{DeliveryProductsTable, TestTable};

static STORE: OnceLock<PgProductStore> = OnceLock::new();
static TEST_STORE_OVERRIDE: Mutex<Option<PgProductStore>> = Mutex::new(None);

/// Initialize the global product store
pub fn init_store(store: PgProductStore) {
    tracing::info!("Initializing global product store (schema '{}')", store.schema());
    if STORE.set(store).is_err() {
        tracing::warn!("Product store already initialized");
    }
}

/// Set a store override for testing
pub fn set_test_store(store: PgProductStore) {
    match TEST_STORE_OVERRIDE.lock() {
        Ok(mut guard) => *guard = Some(store),
        Err(poisoned) => *poisoned.into_inner() = Some(store),
    }
}

/// Get the global product store
pub fn get_store() -> Option<PgProductStore> {
    // Check for test override first
    if let Ok(guard) = TEST_STORE_OVERRIDE.lock() {
        if let Some(ref store) = *guard {
            return Some(store.clone());
        }
    }

    let store = STORE.get().cloned();
    if store.is_none() {
        tracing::warn!("Global product store is empty!");
    }
    store
}

/// Create a PostgreSQL connection pool from the app configuration
pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Create the schema and products table when missing
pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), sqlx::Error> {
    for statement in DeliveryProductsTable::create_sql(schema) {
        sqlx::query(&statement).execute(pool).await?;
    }
    tracing::info!("Schema '{}' is ready", schema);
    Ok(())
}

/// Read seed products from a JSON file: `{ "products": [ ... ] }`
pub fn load_seed_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<ProductFields>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    let products = json
        .get("products")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing 'products' key in {}", path.as_ref().display()))?;
    Ok(serde_json::from_value(products)?)
}

/// Insert the seed products when the store has none. Returns how many were created.
pub async fn seed_if_empty<S>(store: &S, products: Vec<ProductFields>) -> Result<usize, StoreError>
where
    S: ProductStore + ?Sized,
{
    let existing = store.list().await?.len();
    if existing > 0 {
        tracing::info!("Catalog already contains {} products, skipping seed.", existing);
        return Ok(0);
    }

    let mut created = 0;
    for fields in products {
        let name = fields.name.clone();
        match store.create(fields).await {
            Ok(_) => created += 1,
            Err(e) => tracing::warn!("Skipping seed product '{}': {}", name, e),
        }
    }
    tracing::info!("Seeded {} products.", created);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::InMemoryProductStore;
    use crate::fixtures::sample_products;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_seed_if_empty_fills_empty_store() {
        let store = InMemoryProductStore::new();
        let seed: Vec<ProductFields> = sample_products().iter().map(|p| p.to_fields()).collect();

        let created = seed_if_empty(&store, seed.clone()).await.unwrap();
        assert_eq!(created, seed.len());

        // Second run is a no-op
        assert_eq!(seed_if_empty(&store, seed).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_skips_invalid_rows() {
        let store = InMemoryProductStore::new();
        let invalid = ProductFields::default();
        let valid = ProductFields {
            name: "Pudim".to_string(),
            description: "Fatia".to_string(),
            price: Decimal::new(800, 2),
            ..Default::default()
        };

        assert_eq!(seed_if_empty(&store, vec![invalid, valid]).await.unwrap(), 1);
    }

    #[test]
    fn test_load_seed_file_requires_products_key() {
        let path = std::env::temp_dir().join(format!("catalog_seed_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"items": []}"#).unwrap();
        assert!(load_seed_file(&path).is_err());

        std::fs::write(
            &path,
            r#"{"products": [{"name": "Pudim", "category": "sobremesas", "price": "8.00", "description": "Fatia"}]}"#,
        )
        .unwrap();
        let products = load_seed_file(&path).unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].is_active);
        std::fs::remove_file(&path).ok();
    }
}
