//! Shared helpers for WASM API operations
//!
//! Common patterns for serialization, deserialization, and error handling
//! across all API operations. The snapshot crosses the JS boundary as a
//! plain object; serde-wasm-bindgen does the conversion and any failure is
//! logged and surfaced to JS as a rejection string.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Boundary errors: a snapshot or selection that does not convert
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("failed to encode {context}: {message}")]
    Encode { context: String, message: String },
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let err = ApiError::Decode {
            context: context.to_string(),
            message: e.to_string(),
        };
        log::error!("{err}");
        err.into()
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let err = ApiError::Encode {
            context: context.to_string(),
            message: e.to_string(),
        };
        log::error!("{err}");
        err.into()
    })
}
