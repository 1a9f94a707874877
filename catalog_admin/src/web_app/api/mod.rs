// web_app/api/mod.rs - Server-side persistence
//
// - queries: PgProductStore, the Postgres ProductStore
// - db: pool creation, schema bootstrap, seeding and the global store

pub mod queries;

pub mod db;

pub use queries::PgProductStore;
