// web_app/mod.rs - Root module for the Leptos admin application
//
// Architecture:
// - model/: Shared product types and server function payload helpers
// - server_fns.rs: Server function declarations (both client and server)
// - api/: Postgres store, pool and seeding (server side, "db-tools")
// - components/: Reusable UI components (both SSR and hydrate)
// - pages/: The products admin page (both SSR and hydrate)
// - app.rs: Root application component with routing (both SSR and hydrate)

pub mod model;

// Server function declarations - must be available to both client and server
// The #[server] macro generates client stubs that call the server via HTTP
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod server_fns;

// Database access; also used by the seed binary without Leptos
#[cfg(feature = "db-tools")]
pub mod api;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod components;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod pages;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub use app::App;
