// catalog/store.rs - Persistence boundary for products
//
// The editor and the list view only talk to `ProductStore`. The Postgres
// implementation lives in web_app/api (feature "db-tools"); the in-memory one
// below backs tests and seeding checks.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use super::model::{Product, ProductFields, ProductId, ProductPatch};
use super::validation::validate;

/// Failures reported by a store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store rejected the submitted fields
    #[error("Dados inválidos: {0}")]
    Validation(String),

    /// The record vanished between listing and mutation
    #[error("Produto não encontrado: {0}")]
    NotFound(ProductId),

    /// Network, database or authorization failure
    #[error("Erro de comunicação: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// CRUD collaborator for the Product resource
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point-in-time snapshot of every product
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError>;

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

/// Process-local store, ordered by insertion
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with existing products
    pub fn with_products(products: Vec<Product>) -> Self {
        InMemoryProductStore {
            products: Mutex::new(products),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Product>>, StoreError> {
        self.products
            .lock()
            .map_err(|_| StoreError::Transport("product store lock poisoned".to_string()))
    }
}

/// Store-side validation: the same rules as the form, reported as one error
pub fn reject_invalid(fields: &ProductFields) -> Result<(), StoreError> {
    let errors = validate(fields);
    if errors.is_empty() {
        return Ok(());
    }
    let fields: Vec<&str> = errors.keys().map(|f| f.as_str()).collect();
    Err(StoreError::Validation(fields.join(", ")))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        reject_invalid(&fields)?;

        let mut product = Product::from_fields(Uuid::new_v4(), fields);
        let now = Utc::now();
        product.created_at = Some(now);
        product.updated_at = Some(now);

        self.lock()?.push(product.clone());
        tracing::debug!("Created product {} in memory", product.id);
        Ok(product)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut products = self.lock()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = product.clone();
        updated.apply_patch(&patch);
        reject_invalid(&updated.to_fields())?;
        updated.updated_at = Some(Utc::now());

        *product = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut products = self.lock()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
