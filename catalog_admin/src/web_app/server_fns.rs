// web_app/server_fns.rs - Leptos server function declarations
//
// Compiled for BOTH ssr and hydrate. On the server each function resolves the
// PgProductStore and forwards to the ProductStore trait; in the browser the
// #[server] macro turns them into HTTP POST stubs.
//
// Arguments that carry product data travel as JSON strings, and failures as
// tagged messages (see model::encode_store_error).

use leptos::prelude::*;
use crate::web_app::model::*;

#[cfg(feature = "ssr")]
async fn store() -> Result<crate::web_app::api::PgProductStore, ServerFnError> {
    use actix_web::{web::Data, HttpRequest};
    use leptos_actix::extract;
    use crate::web_app::api::{db, PgProductStore};

    // First try to get from context (for testing or if manually set)
    if let Some(store) = use_context::<PgProductStore>() {
        return Ok(store);
    }

    if let Some(store) = db::get_store() {
        return Ok(store);
    }

    match extract().await {
        Ok(req) => {
            let req: HttpRequest = req;
            if let Some(store) = req.app_data::<Data<PgProductStore>>() {
                return Ok(store.as_ref().clone());
            }
        }
        Err(e) => {
            tracing::error!("Failed to extract HttpRequest: {}", e);
        }
    }

    Err(ServerFnError::new(encode_store_error(&StoreError::Transport(
        "Product store not available".to_string(),
    ))))
}

#[cfg(feature = "ssr")]
fn store_failure(error: StoreError) -> ServerFnError {
    ServerFnError::new(encode_store_error(&error))
}

#[cfg(feature = "ssr")]
fn parse_id(raw: &str) -> Result<ProductId, ServerFnError> {
    uuid::Uuid::parse_str(raw.trim())
        .map_err(|e| store_failure(StoreError::Validation(format!("invalid product id '{}': {}", raw, e))))
}

/// Turn a server function failure back into the store taxonomy
pub fn into_store_error(error: ServerFnError) -> StoreError {
    decode_store_error(&error.to_string())
}

/// List every product, in store order
#[server(ListProducts, "/api")]
pub async fn list_products() -> Result<Vec<Product>, ServerFnError> {
    use crate::catalog::store::ProductStore;

    let products = store().await?.list().await.map_err(store_failure)?;
    tracing::info!("Listed {} products", products.len());
    Ok(products)
}

/// Create a product from a JSON-encoded `ProductFields`
#[server(CreateProduct, "/api")]
pub async fn create_product(fields_json: String) -> Result<Product, ServerFnError> {
    use crate::catalog::store::ProductStore;

    let fields: ProductFields = from_payload(&fields_json).map_err(store_failure)?;
    let result = store().await?.create(fields).await;

    match &result {
        Ok(product) => tracing::info!("Product created: {} ({})", product.name, product.id),
        Err(e) => tracing::error!("Create failed: {}", e),
    }
    result.map_err(store_failure)
}

/// Apply a JSON-encoded `ProductPatch` to one product
#[server(UpdateProduct, "/api")]
pub async fn update_product(id: String, patch_json: String) -> Result<Product, ServerFnError> {
    use crate::catalog::store::ProductStore;

    let id = parse_id(&id)?;
    let patch: ProductPatch = from_payload(&patch_json).map_err(store_failure)?;
    let result = store().await?.update(id, patch).await;

    if let Err(e) = &result {
        tracing::error!("Update of {} failed: {}", id, e);
    }
    result.map_err(store_failure)
}

#[server(DeleteProduct, "/api")]
pub async fn delete_product(id: String) -> Result<(), ServerFnError> {
    use crate::catalog::store::ProductStore;

    let id = parse_id(&id)?;
    store().await?.delete(id).await.map_err(store_failure)
}
