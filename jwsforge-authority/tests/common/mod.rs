// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `jwsforge-authority` integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use rand::RngCore as _;
use rand::SeedableRng as _;
use rand_chacha::ChaCha20Rng;
use rsa::RsaPrivateKey;

use jwsforge_authority::{IssuerError, KeyMaterialProvider, RSA_KEY_BITS};

/// Deterministic key-material provider for reproducible certificates.
///
/// Draws all randomness from a seeded ChaCha20 stream, so two providers
/// with the same seed yield identical key material.
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
