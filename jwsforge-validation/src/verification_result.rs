// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde_json::{Map, Value};

/// Classified outcome of validating a token.
///
/// `InvalidChain` and `InvalidSignature` are deliberately distinct:
/// `InvalidChain` means no trusted certificate path existed from the leaf
/// to an anchor under the active policy, while `InvalidSignature` means the
/// chain was accepted but the cryptographic check over the signing input
/// failed. A caller probing a verifier needs to know which layer rejected
/// the token.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    /// Chain and signature both validated; carries the decoded payload
    /// claims.
    Valid(Map<String, Value>),
    /// No trusted certificate path under the active policy.
    InvalidChain,
    /// The chain validated but the token signature did not.
    InvalidSignature,
    /// Not a decodable three-segment token, or the payload of an otherwise
    /// valid token was not a JSON object.
    MalformedToken,
    /// The declared `alg` header is not the implemented RS256.
    UnsupportedAlgorithm,
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}
