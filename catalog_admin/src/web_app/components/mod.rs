// web_app/components/mod.rs - UI components module
//
// Structure:
// - common.rs: Reusable atomic components (Button, Modal, Loading, toasts, etc.)
// - search.rs: Filter bar (SearchBar, CategorySelect)
// - product.rs: Product table, form and delete confirmation

pub mod common;
pub mod search;
pub mod product;

// Re-export commonly used components for convenience
pub use common::*;
pub use search::*;
pub use product::*;
