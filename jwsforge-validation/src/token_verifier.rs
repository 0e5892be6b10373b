// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::RsaPublicKey;
use sha2::Sha256;
use signature::Verifier as _;

use jwsforge_common::{decode_token, DecodedToken, JwsHeaderMap, ALG_RS256, HEADER_ALG, HEADER_CERT_CHAIN};

use crate::chain::{build_trusted_path, parse_cert_der, ParsedCert, TrustOptions};
use crate::verification_result::VerificationResult;

/// Extract the header's certificate chain as DER bytes, leaf first.
///
/// `x5c` entries are standard (padded) base64 of DER, one certificate per
/// entry. This is a different encoding from the URL-safe unpadded base64 of
/// the token's own three segments; the two must not be conflated.
fn extract_cert_chain(header: &JwsHeaderMap) -> Result<Vec<Vec<u8>>, String> {
    let entries = header
        .get_array(HEADER_CERT_CHAIN)
        .ok_or_else(|| "header carries no x5c certificate chain".to_string())?;

    let mut certs_der = Vec::new();
    for entry in entries {
        let Some(b64) = entry.as_str() else {
            return Err("x5c must be an array of base64 strings".to_string());
        };
        let der = STANDARD
            .decode(b64)
            .map_err(|e| format!("x5c entry is not valid base64: {e}"))?;
        certs_der.push(der);
    }

    if certs_der.is_empty() || certs_der[0].is_empty() {
        return Err("x5c certificate chain is empty".to_string());
    }

    Ok(certs_der)
}

fn verify_token_signature(leaf_spki_der: &[u8], token: &DecodedToken) -> Result<(), String> {
    let key = RsaPublicKey::from_public_key_der(leaf_spki_der)
        .map_err(|e| format!("bad RSA public key: {e}"))?;
    let vk = pkcs1v15::VerifyingKey::<Sha256>::new(key);
    let sig = pkcs1v15::Signature::try_from(token.signature.as_slice())
        .map_err(|e| format!("bad RS256 signature bytes: {e}"))?;

    // The signature covers the first two wire segments exactly as received.
    vk.verify(token.wire_signing_input(), &sig)
        .map_err(|_| "signature verification failed".to_string())
}

/// Validate a compact token's certificate chain and signature against a
/// trust configuration.
///
/// The validation is a strictly sequential state machine; any failed step
/// terminates with its classification:
/// 1. decode the compact form (`MalformedToken`);
/// 2. require the RS256 algorithm identifier (`UnsupportedAlgorithm`);
/// 3. extract the chain, leaf = first entry, and build a verified path to
///    the trust material admitted by `options.policy` (`InvalidChain`);
/// 4. verify the RS256 signature with the leaf's public key
///    (`InvalidSignature`);
/// 5. decode the payload claims (`Valid`).
pub fn validate_token(raw: &[u8], options: &TrustOptions) -> VerificationResult {
    let token = match decode_token(raw) {
        Ok(t) => t,
        Err(_) => return VerificationResult::MalformedToken,
    };

    match token.header.get_str(HEADER_ALG) {
        Some(ALG_RS256) => {}
        _ => return VerificationResult::UnsupportedAlgorithm,
    }

    let chain_der = match extract_cert_chain(&token.header) {
        Ok(c) => c,
        Err(_) => return VerificationResult::InvalidChain,
    };

    let leaf = match parse_cert_der(&chain_der[0]) {
        Ok(c) => c,
        Err(_) => return VerificationResult::InvalidChain,
    };
    let mut intermediates: Vec<ParsedCert> = Vec::new();
    for der in &chain_der[1..] {
        match parse_cert_der(der) {
            Ok(c) => intermediates.push(c),
            Err(_) => return VerificationResult::InvalidChain,
        }
    }

    if build_trusted_path(&leaf, &intermediates, options).is_err() {
        return VerificationResult::InvalidChain;
    }

    if verify_token_signature(&leaf.spki_der, &token).is_err() {
        return VerificationResult::InvalidSignature;
    }

    match serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&token.payload) {
        Ok(claims) => VerificationResult::Valid(claims),
        Err(_) => VerificationResult::MalformedToken,
    }
}
