// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `jwsforge-validation` integration tests.
//!
//! Validation needs real RSA-signed chains to exercise, so these helpers
//! issue certificates through `jwsforge-authority` with a seeded provider
//! and assemble compact tokens signed by an arbitrary leaf key.

#![allow(dead_code)]

use std::cell::RefCell;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore as _;
use rand::SeedableRng as _;
use rand_chacha::ChaCha20Rng;
use rsa::pkcs1v15::SigningKey;
use rsa::RsaPrivateKey;
use serde_json::Value;
use sha2::Sha256;
use signature::{SignatureEncoding as _, Signer as _};

use jwsforge_authority::{IssuerError, KeyMaterialProvider, RSA_KEY_BITS};
use jwsforge_common::{encode_token, signing_input, JwsHeaderMap};

/// Deterministic key-material provider backed by a seeded ChaCha20 stream.
pub(crate) struct SeededKeyMaterial {
    rng: RefCell<ChaCha20Rng>,
}

impl SeededKeyMaterial {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl KeyMaterialProvider for SeededKeyMaterial {
    fn generate_rsa_key(&self) -> Result<RsaPrivateKey, IssuerError> {
        RsaPrivateKey::new(&mut *self.rng.borrow_mut(), RSA_KEY_BITS)
            .map_err(|e| IssuerError::KeyGeneration(e.to_string()))
    }

    fn serial_number(&self) -> Vec<u8> {
        let mut bytes = [0u8; 16];
        self.rng.borrow_mut().fill_bytes(&mut bytes);
        bytes[0] &= 0x7f;
        bytes.to_vec()
    }
}

/// Assemble and sign a compact token carrying the given chain.
///
/// The chain entries are standard-base64 encoded into `x5c` leaf first; the
/// signature is RS256 over the canonical signing input with `signing_key`.
pub(crate) fn build_token(
    alg: &str,
    chain_der: &[&[u8]],
    payload: &[u8],
    signing_key: &RsaPrivateKey,
) -> Vec<u8> {
    let mut header = JwsHeaderMap::new();
    header.insert("alg", Value::String(alg.to_string()));
    header.insert(
        "x5c",
        Value::Array(
            chain_der
                .iter()
                .map(|der| Value::String(STANDARD.encode(der)))
                .collect(),
        ),
    );

    let key = SigningKey::<Sha256>::new(signing_key.clone());
    let signature = key.sign(&signing_input(&header, payload)).to_vec();

    encode_token(&header, payload, &signature)
}

/// Flip one character of the token's signature segment, keeping the result
/// valid base64url so decoding still succeeds.
pub(crate) fn corrupt_signature_segment(raw: &[u8]) -> Vec<u8> {
    let mut out = raw.to_vec();
    let last_dot = out.iter().rposition(|b| *b == b'.').unwrap();
    let target = last_dot + 1;
    out[target] = if out[target] == b'A' { b'B' } else { b'A' };
    out
}
