// Leptos web application server for the catalog admin
//
// This binary starts the web server with:
// - Actix-web for HTTP serving
// - Leptos for SSR (server-side rendering)
// - The Postgres product store (schema bootstrap + optional seeding)
// - Static file serving

#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use catalog_admin::config::AppConfig;
    use catalog_admin::web_app::api::{db, PgProductStore};
    use catalog_admin::web_app::app::App as WebApp;
    use leptos::prelude::*;
    use leptos_actix::{generate_route_list, handle_server_fns, LeptosRoutes};
    use leptos_meta::MetaTags;
    use tracing_subscriber::EnvFilter;

    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = db::create_pool(&config).await.map_err(std::io::Error::other)?;
    tracing::info!("Connected to database (max {} connections)", config.max_connections);

    db::ensure_schema(&pool, &config.schema)
        .await
        .map_err(std::io::Error::other)?;

    let store = PgProductStore::new(pool, config.schema.clone());

    // Global store for server functions
    db::init_store(store.clone());

    // Seed database if empty
    match db::load_seed_file(&config.seed_file) {
        Ok(products) => {
            if let Err(e) = db::seed_if_empty(&store, products).await {
                tracing::error!("Failed to seed database: {}", e);
            }
        }
        Err(e) => tracing::warn!("No seed data loaded from {}: {}", config.seed_file, e),
    }

    // Leptos configuration
    let conf = leptos_config::get_configuration(None).map_err(std::io::Error::other)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    tracing::info!("Starting server at http://{}", addr);

    HttpServer::new(move || {
        // Generate the list of routes in the Leptos App
        let routes = generate_route_list(WebApp);
        let leptos_options_inner = leptos_options.clone();
        let site_root_str = site_root.clone().to_string();

        App::new()
            // Share the product store across all handlers
            .app_data(web::Data::new(store.clone()))
            // Explicitly handle server functions
            .route("/api/{tail:.*}", handle_server_fns())
            // Serve JS/WASM/CSS from pkg directory
            .service(Files::new("/pkg", format!("{site_root_str}/pkg")))
            .leptos_routes(routes, {
                let leptos_options = leptos_options_inner.clone();
                move || {
                    view! {
                        <!DOCTYPE html>
                        <html lang="pt-BR">
                            <head>
                                <meta charset="utf-8"/>
                                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                                <AutoReload options=leptos_options.clone() />
                                <HydrationScripts options=leptos_options.clone()/>
                                <MetaTags/>
                            </head>
                            <body>
                                <WebApp/>
                            </body>
                        </html>
                    }
                }
            })
            .app_data(web::Data::new(leptos_options_inner.clone()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("This binary requires the 'ssr' feature. Run with: cargo leptos watch");
}
