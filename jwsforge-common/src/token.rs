// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::header_map::JwsHeaderMap;

/// JOSE header parameter carrying the signing algorithm identifier.
pub const HEADER_ALG: &str = "alg";
/// JOSE header parameter carrying the X.509 certificate chain, leaf first.
pub const HEADER_CERT_CHAIN: &str = "x5c";
/// The only signing algorithm this workspace implements:
/// RSASSA-PKCS1-v1_5 with SHA-256.
pub const ALG_RS256: &str = "RS256";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("token does not have exactly three dot-separated segments (found {0})")]
    SegmentCount(usize),
    #[error("{segment} segment is not valid base64url: {detail}")]
    Base64 {
        segment: &'static str,
        detail: String,
    },
    #[error("{0}")]
    HeaderJson(String),
}

/// A decoded compact token.
///
/// `wire_signing_input` keeps the exact first two wire segments as received,
/// because the signature was computed over those bytes and re-encoding a
/// header that used a different incidental JSON formatting would not
/// reproduce them.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: JwsHeaderMap,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
    wire_signing_input: Vec<u8>,
}

impl DecodedToken {
    /// The exact wire bytes the token signature covers:
    /// `base64url(header) + "." + base64url(payload)` as received.
    pub fn wire_signing_input(&self) -> &[u8] {
        &self.wire_signing_input
    }
}

/// Restore base64url padding by appending `=` until the length is a
/// multiple of 4. Already-padded input is returned unchanged, so the fix
/// is idempotent.
pub fn fix_base64url_padding(segment: &[u8]) -> Vec<u8> {
    let mut out = segment.to_vec();
    let missing = out.len() % 4;
    if missing != 0 {
        out.resize(out.len() + (4 - missing), b'=');
    }
    out
}

fn decode_segment(name: &'static str, segment: &[u8]) -> Result<Vec<u8>, TokenDecodeError> {
    let padded = fix_base64url_padding(segment);
    URL_SAFE.decode(padded).map_err(|e| TokenDecodeError::Base64 {
        segment: name,
        detail: e.to_string(),
    })
}

/// Decode a compact token into header, payload and signature.
///
/// Fails when the input does not split into exactly three segments, when a
/// segment is not decodable base64url after padding restoration, or when the
/// header segment is not a JSON object. No partial decode is returned.
pub fn decode_token(raw: &[u8]) -> Result<DecodedToken, TokenDecodeError> {
    let segments: Vec<&[u8]> = raw.split(|b| *b == b'.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::SegmentCount(segments.len()));
    }

    let header_bytes = decode_segment("header", segments[0])?;
    let payload = decode_segment("payload", segments[1])?;
    let signature = decode_segment("signature", segments[2])?;

    let header = JwsHeaderMap::from_json_bytes(&header_bytes).map_err(TokenDecodeError::HeaderJson)?;

    let mut wire_signing_input = segments[0].to_vec();
    wire_signing_input.push(b'.');
    wire_signing_input.extend_from_slice(segments[1]);

    Ok(DecodedToken {
        header,
        payload,
        signature,
        wire_signing_input,
    })
}

/// The byte string covered by a freshly computed signature:
/// `base64url(header) + "." + base64url(payload)`, both unpadded, with the
/// header in its canonical serialization.
pub fn signing_input(header: &JwsHeaderMap, payload: &[u8]) -> Vec<u8> {
    let mut out = URL_SAFE_NO_PAD.encode(header.to_canonical_bytes()).into_bytes();
    out.push(b'.');
    out.extend_from_slice(URL_SAFE_NO_PAD.encode(payload).as_bytes());
    out
}

/// Serialize a token back to compact form.
///
/// All three segments are base64url-encoded with the padding stripped and
/// joined with `.`; the header goes through its canonical serialization so
/// the first two segments equal the bytes a signer signed via
/// [`signing_input`].
pub fn encode_token(header: &JwsHeaderMap, payload: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut out = signing_input(header, payload);
    out.push(b'.');
    out.extend_from_slice(URL_SAFE_NO_PAD.encode(signature).as_bytes());
    out
}
