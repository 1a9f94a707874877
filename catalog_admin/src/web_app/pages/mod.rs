// web_app/pages/mod.rs - Page components module
//
// - ProductsPage: the products admin screen (list, filters, create/edit dialog)

pub mod products;

pub use products::ProductsPage;
