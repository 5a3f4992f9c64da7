use serde::de::DeserializeOwned;

use crate::error::Result;

/// Decode a response body into either record shape.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
