// catalog/list_view.rs - Snapshot, filters and row actions of the product table
//
// Row actions follow the same split as the edit session: a synchronous
// `begin_*` that updates local state, the store call, then `finish_*` with
// the store's answer. The async helpers chain the three for non-UI callers.

use std::collections::HashMap;

use super::filter::{filter_products, CategoryFilter};
use super::model::{Product, ProductId, ProductPatch};
use super::notification::Notification;
use super::store::{ProductStore, StoreError};

/// Header counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListCounts {
    pub total: usize,
    pub visible: usize,
    pub active: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductListView {
    snapshot: Vec<Product>,
    search_term: String,
    category: CategoryFilter,
    pending_delete: Option<ProductId>,
    // Row id -> `is_active` before the optimistic flip
    toggles_in_flight: HashMap<ProductId, bool>,
    load_error: Option<String>,
}

impl ProductListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(products: Vec<Product>) -> Self {
        ProductListView {
            snapshot: products,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> &[Product] {
        &self.snapshot
    }

    pub fn replace_snapshot(&mut self, products: Vec<Product>) {
        tracing::debug!("Snapshot replaced with {} products", products.len());
        self.snapshot = products;
        self.load_error = None;
        if let Some(id) = self.pending_delete {
            if self.find(id).is_none() {
                self.pending_delete = None;
            }
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Rows to display, in snapshot order
    pub fn visible(&self) -> Vec<Product> {
        filter_products(&self.snapshot, &self.search_term, self.category)
    }

    pub fn counts(&self) -> ListCounts {
        ListCounts {
            total: self.snapshot.len(),
            visible: self.visible().len(),
            active: self.snapshot.iter().filter(|p| p.is_active).count(),
        }
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.snapshot.iter().find(|p| p.id == id)
    }

    /// Put a saved product into the snapshot (replace, or append when new)
    pub fn upsert(&mut self, product: Product) {
        match self.snapshot.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.snapshot.push(product),
        }
    }

    fn remove(&mut self, id: ProductId) {
        self.snapshot.retain(|p| p.id != id);
    }

    /// Reload the snapshot. A failure keeps the previous rows.
    pub async fn refresh<S>(&mut self, store: &S) -> Result<(), Notification>
    where
        S: ProductStore + ?Sized,
    {
        match store.list().await {
            Ok(products) => {
                self.replace_snapshot(products);
                Ok(())
            }
            Err(error) => Err(self.fail_load(&error)),
        }
    }

    /// Record a failed reload. The previous rows stay visible.
    pub fn fail_load(&mut self, error: &StoreError) -> Notification {
        let message = format!("Erro ao carregar produtos: {}", error);
        tracing::warn!("{}", message);
        self.load_error = Some(message.clone());
        Notification::error(message)
    }

    // ---- Delete, with an explicit confirmation step ----

    /// Ask for confirmation before deleting. False when the row is unknown.
    pub fn request_delete(&mut self, id: ProductId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Product waiting for delete confirmation
    pub fn pending_delete(&self) -> Option<&Product> {
        self.pending_delete.and_then(|id| self.find(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// User confirmed: hand out the id to delete
    pub fn confirm_delete(&mut self) -> Option<ProductId> {
        self.pending_delete.take()
    }

    pub fn finish_delete(&mut self, id: ProductId, result: Result<(), StoreError>) -> Notification {
        match result {
            Ok(()) => {
                tracing::info!("Deleted product {}", id);
                self.remove(id);
                Notification::success("Produto excluído com sucesso!")
            }
            Err(error) => {
                // A vanished record cannot be deleted again; drop the stale row
                if matches!(error, StoreError::NotFound(_)) {
                    self.remove(id);
                }
                let message = format!("Erro ao excluir produto: {}", error);
                tracing::warn!("{}", message);
                Notification::error(message)
            }
        }
    }

    /// Delete the confirmed product. None when nothing was confirmed.
    pub async fn delete_confirmed<S>(&mut self, store: &S) -> Option<Notification>
    where
        S: ProductStore + ?Sized,
    {
        let id = self.confirm_delete()?;
        let result = store.delete(id).await;
        Some(self.finish_delete(id, result))
    }

    // ---- Optimistic active/inactive toggle ----

    /// Flip `is_active` locally and return the patch to send.
    /// None when the row is unknown or already toggling.
    pub fn begin_toggle(&mut self, id: ProductId) -> Option<ProductPatch> {
        if self.toggles_in_flight.contains_key(&id) {
            return None;
        }
        let product = self.snapshot.iter_mut().find(|p| p.id == id)?;
        let previous = product.is_active;
        product.is_active = !previous;
        let patch = ProductPatch::active(product.is_active);
        self.toggles_in_flight.insert(id, previous);
        Some(patch)
    }

    pub fn is_toggling(&self, id: ProductId) -> bool {
        self.toggles_in_flight.contains_key(&id)
    }

    pub fn finish_toggle(&mut self, id: ProductId, result: Result<Product, StoreError>) -> Notification {
        let previous = self.toggles_in_flight.remove(&id);
        match result {
            Ok(product) => {
                let message = if product.is_active {
                    "Produto ativado"
                } else {
                    "Produto desativado"
                };
                self.upsert(product);
                Notification::success(message)
            }
            Err(error) => {
                // Restore the value from before the flip, even if a reload
                // replaced the row meanwhile
                if let (Some(previous), Some(product)) = (previous, self.snapshot.iter_mut().find(|p| p.id == id)) {
                    product.is_active = previous;
                }
                let message = format!("Erro ao alterar status do produto: {}", error);
                tracing::warn!("{}", message);
                Notification::error(message)
            }
        }
    }

    /// Optimistically toggle a row and reconcile with the store
    pub async fn toggle_active<S>(&mut self, store: &S, id: ProductId) -> Option<Notification>
    where
        S: ProductStore + ?Sized,
    {
        let patch = self.begin_toggle(id)?;
        let result = store.update(id, patch).await;
        Some(self.finish_toggle(id, result))
    }
}
