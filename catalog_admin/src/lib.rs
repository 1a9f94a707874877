// lib.rs - Root module for the catalog_admin library
//
// - catalog: edit session, validation, filtering and the store boundary
// - fixtures: reusable product data and table setup
// - config: environment configuration for server-side tools
// - web_app: Leptos admin screen (SSR + hydrate)

/// UI-independent product catalog logic
pub mod catalog;

/// The fixtures module contains reusable catalog data and database setup
pub mod fixtures;

#[cfg(feature = "db-tools")]
pub mod config;

pub mod web_app;

/// WASM entry point: hydrates the server-rendered admin page
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(web_app::App);
}
