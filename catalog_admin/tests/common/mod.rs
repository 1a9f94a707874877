// common/mod.rs - Shared test utilities
//
// - sample_store / CountingStore: in-memory stores with call counters and
//   injectable failures for the session and list view suites
// - db (feature "db-tools"): isolated Postgres schema per test

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_admin::catalog::{
    InMemoryProductStore, Product, ProductFields, ProductId, ProductPatch, ProductStore, StoreError,
};
use catalog_admin::fixtures::sample_products;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory store holding the sample catalog
pub fn sample_store() -> InMemoryProductStore {
    InMemoryProductStore::with_products(sample_products())
}

/// Look up a sample product by name
pub fn sample(name: &str) -> Product {
    sample_products()
        .into_iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no sample product named {}", name))
}

/// Store wrapper that counts calls and can fail the next mutation
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryProductStore,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    fail_next: Mutex<Option<StoreError>>,
}

impl CountingStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        CountingStore {
            inner: InMemoryProductStore::with_products(products),
            ..Default::default()
        }
    }

    pub fn sample() -> Self {
        Self::with_products(sample_products())
    }

    /// The next call (of any kind) fails with `error`
    pub fn fail_next(&self, error: StoreError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        Self::calls(&self.creates) + Self::calls(&self.updates) + Self::calls(&self.deletes)
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for CountingStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.list().await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.create(fields).await
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.delete(id).await
    }
}

#[cfg(feature = "db-tools")]
pub mod db {
    use catalog_admin::fixtures::{DeliveryProductsTable, TestTable};
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use std::env;
    use std::time::Duration;

    /// Create a database connection pool for testing
    pub async fn create_test_pool() -> anyhow::Result<PgPool> {
        dotenv::dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&database_url)
            .await?;

        Ok(pool)
    }

    /// Drop the test schema and everything in it
    pub async fn teardown_test_db(pool: &PgPool, schema: &str) -> anyhow::Result<()> {
        let query = format!("DROP SCHEMA IF EXISTS {} CASCADE", schema);
        sqlx::query(&query).execute(pool).await?;
        Ok(())
    }

    /// Recreate the schema, the products table and the seed rows
    pub async fn setup_test_db(pool: &PgPool, schema: &str) -> anyhow::Result<()> {
        teardown_test_db(pool, schema).await?;
        for statement in DeliveryProductsTable::setup_sql(schema) {
            sqlx::query(&statement).execute(pool).await?;
        }
        Ok(())
    }

    /// Unique-per-test schema name (alphanumeric + underscore, within Postgres limits)
    pub fn generate_test_schema_name(test_name: &str) -> String {
        let sanitized = test_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect::<String>();

        let truncated = if sanitized.len() > 50 {
            &sanitized[..50]
        } else {
            &sanitized
        };

        format!("test_{}", truncated)
    }

    /// Full setup and teardown wrapper for tests with an isolated schema
    pub async fn with_test_db<F, Fut>(test_name: &str, test_fn: F) -> anyhow::Result<()>
    where
        F: FnOnce(PgPool, String) -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<()>>,
    {
        let pool = create_test_pool().await?;
        let schema = generate_test_schema_name(test_name);

        setup_test_db(&pool, &schema).await?;

        let result = test_fn(pool.clone(), schema.clone()).await;

        // Always cleanup, even if test fails
        teardown_test_db(&pool, &schema).await?;

        result
    }
}
