// fixtures/mod.rs - Reusable catalog data and table setup
//
// Two kinds of fixtures live here:
// - SQL fixtures: how to create (and optionally fill) the products table in a
//   given schema. Used by the Postgres store bootstrap and the DB tests.
// - Value fixtures: ready-made `Product`s for in-memory stores and tests.

pub mod tables;

/// A table that can be created and filled inside an isolated schema
pub trait TestTable {
    /// DDL only, safe to run repeatedly
    fn create_sql(schema: &str) -> Vec<String>;

    /// DDL followed by the seed rows, executed in order
    fn setup_sql(schema: &str) -> Vec<String>;
}

pub use tables::{sample_id, sample_products, DeliveryProductsTable};
