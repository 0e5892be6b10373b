// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use rand::rngs::OsRng;
use rand::RngCore as _;
use rsa::RsaPrivateKey;

/// RSA modulus size for every key this workspace generates.
pub const RSA_KEY_BITS: usize = 2048;

#[derive(thiserror::Error, Debug)]
pub enum IssuerError {
    #[error("RSA key generation failed: {0}")]
    KeyGeneration(String),
    #[error("private key serialization failed: {0}")]
    KeyEncoding(String),
    #[error("certificate construction failed: {0}")]
    CertificateBuild(String),
}

/// Source of key material and serial numbers for certificate issuance.
///
/// Contract:
/// - `generate_rsa_key` returns a fresh RSA-2048 private key; a failure is a
///   fatal environment error and is never retried.
/// - `serial_number` returns bytes interpreted as a positive DER integer;
///   the top bit of the first byte must be clear.
///
/// Issuance is non-deterministic in production. Tests inject a seeded
/// implementation to obtain reproducible key material without touching the
/// production randomness path.
pub trait KeyMaterialProvider {
    fn generate_rsa_key(&self) -> Result<RsaPrivateKey, IssuerError>;

    fn serial_number(&self) -> Vec<u8>;
}

/// Production provider backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeyMaterial;

impl KeyMaterialProvider for OsKeyMaterial {
    fn generate_rsa_key(&self) -> Result<RsaPrivateKey, IssuerError> {
        RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| IssuerError::KeyGeneration(e.to_string()))
    }

    fn serial_number(&self) -> Vec<u8> {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        // Keep the DER integer positive.
        bytes[0] &= 0x7f;
        bytes.to_vec()
    }
}
