// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compact JWS token codec.
//!
//! This crate is the shared leaf of the workspace: it parses and serializes
//! the compact three-segment signed-token format (`header.payload.signature`,
//! each segment base64url without padding) and models the JOSE header as an
//! ordered JSON map with a deterministic serialization.
//!
//! The deterministic header encoding matters because the token signature
//! covers the serialized header bytes; both the forge and the validator go
//! through this codec so they agree on those bytes exactly.

mod header_map;
mod token;

pub use header_map::JwsHeaderMap;
pub use token::{
    decode_token, encode_token, fix_base64url_padding, signing_input, DecodedToken,
    TokenDecodeError, ALG_RS256, HEADER_ALG, HEADER_CERT_CHAIN,
};
