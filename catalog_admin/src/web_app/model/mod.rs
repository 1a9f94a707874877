// web_app/model/mod.rs - Shared data types for client and server
//
// The product types come straight from the catalog core. What this module
// adds is the transport glue for server functions: payloads travel as JSON
// strings and store errors travel as tagged messages, so the client can turn
// a `ServerFnError` back into the `StoreError` the core expects.

use uuid::Uuid;

pub use crate::catalog::model::{Category, Product, ProductFields, ProductId, ProductPatch};
pub use crate::catalog::store::StoreError;

const VALIDATION_TAG: &str = "validation|";
const NOT_FOUND_TAG: &str = "not_found|";
const TRANSPORT_TAG: &str = "transport|";

/// Encode a store error for a server function response
pub fn encode_store_error(error: &StoreError) -> String {
    match error {
        StoreError::Validation(message) => format!("{}{}", VALIDATION_TAG, message),
        StoreError::NotFound(id) => format!("{}{}", NOT_FOUND_TAG, id),
        StoreError::Transport(message) => format!("{}{}", TRANSPORT_TAG, message),
    }
}

/// Recover a store error from a server function error message.
///
/// The message may be wrapped by the framework, so tags are searched anywhere.
/// Untagged messages are transport failures.
pub fn decode_store_error(message: &str) -> StoreError {
    if let Some(pos) = message.find(VALIDATION_TAG) {
        return StoreError::Validation(message[pos + VALIDATION_TAG.len()..].to_string());
    }
    if let Some(pos) = message.find(NOT_FOUND_TAG) {
        let raw = message[pos + NOT_FOUND_TAG.len()..].trim();
        return match Uuid::parse_str(raw) {
            Ok(id) => StoreError::NotFound(id),
            Err(_) => StoreError::Transport(message.to_string()),
        };
    }
    if let Some(pos) = message.find(TRANSPORT_TAG) {
        return StoreError::Transport(message[pos + TRANSPORT_TAG.len()..].to_string());
    }
    StoreError::Transport(message.to_string())
}

/// Serialize a payload for a server function argument
pub fn to_payload<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Transport(format!("JSON encode error: {}", e)))
}

/// Deserialize a server function argument
pub fn from_payload<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, StoreError> {
    serde_json::from_str(payload).map_err(|e| StoreError::Validation(format!("JSON parse error: {}", e)))
}
