//! JSON representation of the enviroCar entities.
//!
//! [`encode`] turns entities into `serde_json::Value` documents, filtering
//! fields through the viewer's rights; [`decode`] reads request bodies.

pub mod decode;
pub mod encode;

use serde_json::Value;

use crate::error::Result;

/// Serializes an encoded document.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
