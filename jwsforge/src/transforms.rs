// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde_json::{Map, Value};

/// Payload transform that marks an attestation verdict as passing: forces
/// the `basicIntegrity` and `ctsProfileMatch` claims to `true`.
///
/// This is the canonical transform of the original tooling, provided as a
/// convenience; `forge_token` accepts any byte-to-byte function. A payload
/// that is not a JSON object is returned unchanged, on the grounds that a
/// transform targeting named claims has nothing to flip in it.
pub fn set_integrity_passing(payload: &[u8]) -> Vec<u8> {
    let Ok(mut claims) = serde_json::from_slice::<Map<String, Value>>(payload) else {
        return payload.to_vec();
    };

    claims.insert("basicIntegrity".to_string(), Value::Bool(true));
    claims.insert("ctsProfileMatch".to_string(), Value::Bool(true));

    // Serializing a JSON object into a Vec cannot fail.
    serde_json::to_vec(&claims).expect("JSON object serialization is infallible")
}
