// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde_json::{Map, Value};

/// Ordered JOSE header of a compact token.
///
/// The token signature is computed over the serialized header bytes, so the
/// header must serialize deterministically: keys keep their insertion order
/// (`serde_json` is built with `preserve_order`) and `to_canonical_bytes`
/// always yields the same bytes for the same map contents. Mutating a header
/// (e.g. rewriting the certificate chain) and re-serializing is therefore
/// stable for re-signing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JwsHeaderMap {
    map: Map<String, Value>,
}

impl JwsHeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header from its JSON byte form.
    ///
    /// The header must be a JSON object; any other JSON value is rejected.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, String> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| format!("header is not valid JSON: {e}"))?;
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err("header is not a JSON object".to_string()),
        }
    }

    /// Canonical serialized header bytes. Token signatures cover exactly
    /// these bytes.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        // Serializing a JSON object into a Vec cannot fail.
        serde_json::to_vec(&self.map).expect("JSON object serialization is infallible")
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(Value::as_str)
    }

    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.map.get(key).and_then(|v| match v {
            Value::Array(a) => Some(a.as_slice()),
            _ => None,
        })
    }

    /// Insert or replace a header parameter. Replacing an existing key keeps
    /// its position in the serialization order.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.map.insert(key.into(), value);
    }

    pub fn map(&self) -> &Map<String, Value> {
        &self.map
    }
}
