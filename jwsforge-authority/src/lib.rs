// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate-authority and leaf issuance.
//!
//! This crate mints the attacker-controlled certificate material used when
//! forging tokens: a fresh self-signed authority with CA capability, and a
//! leaf certificate chained to it whose subject alternative name impersonates
//! a target service identity.
//!
//! Everything here is ephemeral. Each issuance call generates fresh RSA-2048
//! key material and a fresh serial number through a [`KeyMaterialProvider`];
//! nothing is cached, persisted, or shared between calls. Production code
//! uses [`OsKeyMaterial`] (OS CSPRNG); tests substitute a seeded provider for
//! reproducible keys.

mod issuer;
mod key_material;

pub use issuer::{issue_authority, issue_leaf, IssuedAuthority, IssuedLeaf};
pub use key_material::{IssuerError, KeyMaterialProvider, OsKeyMaterial, RSA_KEY_BITS};
