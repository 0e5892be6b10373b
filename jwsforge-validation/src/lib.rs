// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain and signature validation for compact JWS tokens.
//!
//! The validator classifies a raw token against a trust configuration:
//! decode, algorithm check, certificate path building under the configured
//! [`TrustPolicy`], then cryptographic signature verification. The steps run
//! strictly in that order and every failure is terminal; chain failures and
//! signature failures are reported as distinct outcomes because they
//! diagnose different defensive gaps in a verifier.
//!
//! Trust material is built fresh per call from the options; nothing is
//! cached or shared between validations.

mod chain;
mod token_verifier;
mod verification_result;

pub use chain::{TrustConfigError, TrustOptions, TrustPolicy};
pub use token_verifier::validate_token;
pub use verification_result::VerificationResult;
