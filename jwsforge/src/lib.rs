// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Forge and validate JWS-style attestation tokens.
//!
//! This crate is the primary entry point of the workspace. It implements the
//! forge pipeline (decode a compact token, mint a rogue authority and an
//! impersonating leaf, transform the payload, re-sign, re-encode) and
//! re-exports the matched validation pipeline so both directions of the
//! attack experiment live behind one facade.
//!
//! Design note: to keep the public API simple, the codec, issuance and
//! validation types are re-exported at the crate root.

mod forge;
mod transforms;

pub use forge::{
    forge_token, ForgeError, ForgeOptions, DEFAULT_AUTHORITY_SUBJECT, DEFAULT_LEAF_IDENTITY,
};
pub use transforms::set_integrity_passing;

pub use jwsforge_authority::{
    issue_authority, issue_leaf, IssuedAuthority, IssuedLeaf, IssuerError, KeyMaterialProvider,
    OsKeyMaterial,
};
pub use jwsforge_common::{
    decode_token, encode_token, DecodedToken, JwsHeaderMap, TokenDecodeError, ALG_RS256,
    HEADER_ALG, HEADER_CERT_CHAIN,
};
pub use jwsforge_validation::{validate_token, TrustOptions, TrustPolicy, VerificationResult};
