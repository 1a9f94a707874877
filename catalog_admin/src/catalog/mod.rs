// catalog/mod.rs - UI-independent core of the product admin screen
//
// - model: Product, draft, patch and display helpers
// - validation: field rules for the product form
// - filter: search + category filtering of a snapshot
// - store: ProductStore trait, StoreError, in-memory store
// - session: edit session state machine (create/edit/save/cancel)
// - list_view: snapshot holder with delete confirmation and status toggle
// - notification: feedback values rendered by the view layer
//
// Nothing in here depends on Leptos or the database, so the same logic runs
// in the browser, on the server and in plain unit tests.

pub mod filter;
pub mod list_view;
pub mod model;
pub mod notification;
pub mod session;
pub mod store;
pub mod validation;

pub use filter::{filter_products, CategoryFilter, ALL_CATEGORIES};
pub use list_view::{ListCounts, ProductListView};
pub use model::{Category, Product, ProductDraft, ProductFields, ProductId, ProductPatch};
pub use notification::{Notification, NotificationKind};
pub use session::{EditSession, SaveAttempt, SaveOutcome, SaveRequest, SessionError, SessionState};
pub use store::{InMemoryProductStore, ProductStore, StoreError};
pub use validation::{validate, FieldErrors, ProductField};
