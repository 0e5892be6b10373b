// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair, SerialNumber,
};
use rsa::pkcs8::EncodePrivateKey as _;
use rsa::RsaPrivateKey;
use time::{Duration, OffsetDateTime};

use crate::key_material::{IssuerError, KeyMaterialProvider};

// Fixed organizational attributes stamped on every certificate.
const ORGANIZATION: &str = "Duo Security";
const ORGANIZATIONAL_UNIT: &str = "Duo Labs";

/// A freshly minted certificate authority.
///
/// Holds the self-signed CA certificate together with the private key so it
/// can sign leaf certificates chained to it.
pub struct IssuedAuthority {
    cert: rcgen::Certificate,
    key_pair: KeyPair,
    private_key: RsaPrivateKey,
}

impl IssuedAuthority {
    pub fn cert_der(&self) -> &[u8] {
        self.cert.der().as_ref()
    }

    pub fn cert_pem(&self) -> String {
        self.cert.pem()
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

/// A leaf certificate issued by an [`IssuedAuthority`], plus the private key
/// that signs tokens under it.
pub struct IssuedLeaf {
    cert: rcgen::Certificate,
    private_key: RsaPrivateKey,
}

impl IssuedLeaf {
    pub fn cert_der(&self) -> &[u8] {
        self.cert.der().as_ref()
    }

    pub fn cert_pem(&self) -> String {
        self.cert.pem()
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

/// Bridge an `rsa` private key into an `rcgen` key pair via PKCS#8 DER, so
/// the same key both signs certificates and later signs tokens.
fn rcgen_key_pair(key: &RsaPrivateKey) -> Result<KeyPair, IssuerError> {
    let der = key
        .to_pkcs8_der()
        .map_err(|e| IssuerError::KeyEncoding(e.to_string()))?;
    KeyPair::try_from(der.as_bytes()).map_err(|e| IssuerError::KeyEncoding(e.to_string()))
}

fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    dn.push(DnType::OrganizationName, ORGANIZATION);
    dn.push(DnType::OrganizationalUnitName, ORGANIZATIONAL_UNIT);
    dn
}

// Validity runs from a day in the past (clock-skew slack) to a fixed
// future expiry, matching the bounded window of the original issuer.
fn validity_window() -> (OffsetDateTime, OffsetDateTime) {
    (
        OffsetDateTime::now_utc() - Duration::days(1),
        rcgen::date_time_ymd(2034, 8, 2),
    )
}

/// Mint a self-signed certificate authority.
///
/// Subject equals issuer (`CN=subject` plus the fixed organizational
/// fields), basic constraints set CA=true with path length 0, and the
/// certificate is signed with its own RSA-2048 key using SHA-256. Every call
/// produces structurally valid but non-deterministic output: fresh key
/// material and a fresh serial number from the provider.
pub fn issue_authority(
    subject: &str,
    provider: &dyn KeyMaterialProvider,
) -> Result<IssuedAuthority, IssuerError> {
    let private_key = provider.generate_rsa_key()?;
    let key_pair = rcgen_key_pair(&private_key)?;

    let mut params = CertificateParams::default();
    params.distinguished_name = distinguished_name(subject);
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(0));
    params.serial_number = Some(SerialNumber::from(provider.serial_number()));
    let (not_before, not_after) = validity_window();
    params.not_before = not_before;
    params.not_after = not_after;

    let cert = params
        .self_signed(&key_pair)
        .map_err(|e| IssuerError::CertificateBuild(e.to_string()))?;

    Ok(IssuedAuthority {
        cert,
        key_pair,
        private_key,
    })
}

/// Issue a leaf certificate under `authority`.
///
/// The leaf's subject alternative name is `identity` (the impersonated
/// service), its issuer is the authority's subject, and it carries no CA
/// capability. Signed by the authority's private key with SHA-256.
pub fn issue_leaf(
    identity: &str,
    authority: &IssuedAuthority,
    provider: &dyn KeyMaterialProvider,
) -> Result<IssuedLeaf, IssuerError> {
    let private_key = provider.generate_rsa_key()?;
    let key_pair = rcgen_key_pair(&private_key)?;

    let mut params = CertificateParams::new(vec![identity.to_string()])
        .map_err(|e| IssuerError::CertificateBuild(e.to_string()))?;
    params.distinguished_name = distinguished_name(identity);
    params.serial_number = Some(SerialNumber::from(provider.serial_number()));
    let (not_before, not_after) = validity_window();
    params.not_before = not_before;
    params.not_after = not_after;

    let cert = params
        .signed_by(&key_pair, &authority.cert, &authority.key_pair)
        .map_err(|e| IssuerError::CertificateBuild(e.to_string()))?;

    Ok(IssuedLeaf { cert, private_key })
}
