// fixtures/tables/mod.rs
//
// Table templates implementing `TestTable`. Defined once, reused by the
// Postgres store bootstrap, the seeding binary and the DB tests.

pub mod products;

pub use products::{sample_id, sample_products, DeliveryProductsTable};
