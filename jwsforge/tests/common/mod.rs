// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `jwsforge` integration tests.

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

use jwsforge::{
    encode_token, issue_authority, issue_leaf, IssuedAuthority, IssuerError, JwsHeaderMap,
    KeyMaterialProvider,
};
use jwsforge_authority::RSA_KEY_BITS;

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

/// A "legitimate" source token: a failing attestation verdict signed by a
/// leaf chained to a locally issued root, as an upstream attestation service
/// would have produced it.
pub(crate) struct SourceToken {
    pub(crate) root: IssuedAuthority,
    pub(crate) raw: Vec<u8>,
}

pub(crate) const SOURCE_CLAIMS: &[u8] =
    br#"{"nonce":"abc","basicIntegrity":false,"ctsProfileMatch":false}"#;

pub(crate) fn build_source_token(seed: u64) -> SourceToken {
    let provider = SeededKeyMaterial::new(seed);
    let root = issue_authority("legitimate attestation root", &provider).unwrap();
    let leaf = issue_leaf("attest.android.com", &root, &provider).unwrap();

    let mut header = JwsHeaderMap::new();
    header.insert("alg", Value::String("RS256".to_string()));
    header.insert(
        "x5c",
        Value::Array(vec![
            Value::String(STANDARD.encode(leaf.cert_der())),
            Value::String(STANDARD.encode(root.cert_der())),
        ]),
    );

    let key = SigningKey::<Sha256>::new(leaf.private_key().clone());
    let signature = key
        .sign(&jwsforge_common::signing_input(&header, SOURCE_CLAIMS))
        .to_vec();
    let raw = encode_token(&header, SOURCE_CLAIMS, &signature);

    SourceToken { root, raw }
}
