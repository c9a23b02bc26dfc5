//! Public keys of certificates and the signature primitives using them.
//!
//! Supported keys are RSA keys, used with PKCS#1 v1.5 signatures, and ECDSA keys
//! on the P-256 and P-384 curves.
use const_oid::db::rfc5912;
use rsa::signature::hazmat::PrehashVerifier;
use rsa::traits::{PublicKeyParts, SignatureScheme};
use rsa::RsaPublicKey;

use crate::digest::DigestAlgorithm;
use crate::params::VerifyParams;
use crate::x509::{self, AlgorithmIdentifierRef, Certificate};

// Does not exist in const_oid
#[cfg(feature = "sha1")]
const ECDSA_WITH_SHA_1: const_oid::ObjectIdentifier =
    const_oid::ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");

// Obsolete oid used in some files in place of rfc5912::SHA_1_WITH_RSA_ENCRYPTION
#[cfg(feature = "sha1")]
const SHA1_WITH_RSA: const_oid::ObjectIdentifier =
    const_oid::ObjectIdentifier::new_unwrap("1.3.14.3.2.29");

/// Family of a public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyKind {
    Rsa,
    Ecdsa,
}

/// Public key extracted from a certificate.
#[derive(Clone, Debug)]
pub(crate) enum PublicKey {
    Rsa(RsaPublicKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

impl PublicKey {
    /// Extract the public key of a certificate.
    ///
    /// Returns `None` if the key is not supported or rejected by the profile.
    pub(crate) fn from_certificate(cert: &Certificate, params: &VerifyParams) -> Option<Self> {
        let Ok(spki) = cert
            .tbs_certificate
            .subject_public_key_info
            .decode_as::<spki::SubjectPublicKeyInfoRef>()
        else {
            return None;
        };
        let algorithm = spki.algorithm.oid;

        match algorithm {
            rfc5912::RSA_ENCRYPTION => {
                let key = RsaPublicKey::try_from(spki).ok()?;
                let bits = key.n().bits();
                if bits < params.min_rsa_key_bits {
                    log::warn!(
                        "rejecting RSA key of {bits} bits, minimum is {}",
                        params.min_rsa_key_bits
                    );
                    return None;
                }
                Some(Self::Rsa(key))
            }
            rfc5912::ID_EC_PUBLIC_KEY => {
                let curve = spki
                    .algorithm
                    .parameters?
                    .decode_as::<const_oid::ObjectIdentifier>()
                    .ok()?;

                match curve {
                    rfc5912::SECP_256_R_1 => p256::ecdsa::VerifyingKey::try_from(spki)
                        .ok()
                        .map(Self::P256),
                    rfc5912::SECP_384_R_1 => p384::ecdsa::VerifyingKey::try_from(spki)
                        .ok()
                        .map(Self::P384),
                    _ => {
                        log::debug!("unsupported curve {curve}");
                        None
                    }
                }
            }
            _ => {
                log::debug!("unsupported public key algorithm {algorithm}");
                None
            }
        }
    }

    pub(crate) fn kind(&self) -> KeyKind {
        match self {
            Self::Rsa(_) => KeyKind::Rsa,
            Self::P256(_) | Self::P384(_) => KeyKind::Ecdsa,
        }
    }

    /// Verify a signature over an already computed digest.
    pub(crate) fn verify_prehash(
        &self,
        digest_algorithm: DigestAlgorithm,
        prehash: &[u8],
        signature: &[u8],
    ) -> bool {
        match self {
            Self::Rsa(key) => {
                let scheme = match digest_algorithm {
                    #[cfg(feature = "sha1")]
                    DigestAlgorithm::Sha1 => rsa::pkcs1v15::Pkcs1v15Sign::new::<sha1::Sha1>(),
                    DigestAlgorithm::Sha256 => rsa::pkcs1v15::Pkcs1v15Sign::new::<sha2::Sha256>(),
                    DigestAlgorithm::Sha384 => rsa::pkcs1v15::Pkcs1v15Sign::new::<sha2::Sha384>(),
                    DigestAlgorithm::Sha512 => rsa::pkcs1v15::Pkcs1v15Sign::new::<sha2::Sha512>(),
                };
                scheme.verify(key, prehash, signature).is_ok()
            }
            Self::P256(key) => {
                let Ok(signature) = p256::ecdsa::DerSignature::from_bytes(signature) else {
                    return false;
                };
                key.verify_prehash(prehash, &signature).is_ok()
            }
            Self::P384(key) => {
                let Ok(signature) = p384::ecdsa::DerSignature::from_bytes(signature) else {
                    return false;
                };
                key.verify_prehash(prehash, &signature).is_ok()
            }
        }
    }
}

/// Key family and digest algorithm of a signature algorithm.
///
/// The digest is `None` for algorithms that only name the key family
/// (`rsaEncryption` and `id-ecPublicKey`), as used in signer infos.
pub(crate) fn signature_algorithm(
    algorithm: &AlgorithmIdentifierRef,
) -> Option<(KeyKind, Option<DigestAlgorithm>)> {
    match algorithm.oid {
        rfc5912::RSA_ENCRYPTION => Some((KeyKind::Rsa, None)),
        #[cfg(feature = "sha1")]
        rfc5912::SHA_1_WITH_RSA_ENCRYPTION | SHA1_WITH_RSA => {
            Some((KeyKind::Rsa, Some(DigestAlgorithm::Sha1)))
        }
        rfc5912::SHA_256_WITH_RSA_ENCRYPTION => Some((KeyKind::Rsa, Some(DigestAlgorithm::Sha256))),
        rfc5912::SHA_384_WITH_RSA_ENCRYPTION => Some((KeyKind::Rsa, Some(DigestAlgorithm::Sha384))),
        rfc5912::SHA_512_WITH_RSA_ENCRYPTION => Some((KeyKind::Rsa, Some(DigestAlgorithm::Sha512))),
        rfc5912::ID_EC_PUBLIC_KEY => Some((KeyKind::Ecdsa, None)),
        #[cfg(feature = "sha1")]
        ECDSA_WITH_SHA_1 => Some((KeyKind::Ecdsa, Some(DigestAlgorithm::Sha1))),
        rfc5912::ECDSA_WITH_SHA_256 => Some((KeyKind::Ecdsa, Some(DigestAlgorithm::Sha256))),
        rfc5912::ECDSA_WITH_SHA_384 => Some((KeyKind::Ecdsa, Some(DigestAlgorithm::Sha384))),
        rfc5912::ECDSA_WITH_SHA_512 => Some((KeyKind::Ecdsa, Some(DigestAlgorithm::Sha512))),
        _ => None,
    }
}

/// Check that `cert` was signed by the key of `issuer`.
///
/// The names are not compared here, only the signature is checked.
pub(crate) fn verify_certificate_signature(
    cert: &Certificate,
    issuer: &Certificate,
    params: &VerifyParams,
) -> bool {
    if !x509::signature_algorithms_match(cert) {
        return false;
    }

    verify_signed_bytes(
        issuer,
        &cert.signature_algorithm,
        cert.tbs_raw,
        cert.signature.raw_bytes(),
        params,
    )
}

/// Check that `crl` was signed by the key of `issuer`.
pub(crate) fn verify_crl_signature(
    crl: &x509::Crl,
    issuer: &Certificate,
    params: &VerifyParams,
) -> bool {
    verify_signed_bytes(
        issuer,
        &crl.signature_algorithm,
        crl.tbs_raw,
        crl.signature.raw_bytes(),
        params,
    )
}

fn verify_signed_bytes(
    issuer: &Certificate,
    algorithm: &AlgorithmIdentifierRef,
    data: &[u8],
    signature: &[u8],
    params: &VerifyParams,
) -> bool {
    let Some((kind, Some(digest_algorithm))) = signature_algorithm(algorithm) else {
        log::debug!("unsupported signature algorithm {}", algorithm.oid);
        return false;
    };
    let Some(key) = PublicKey::from_certificate(issuer, params) else {
        return false;
    };
    if key.kind() != kind {
        return false;
    }

    let prehash = digest_algorithm.digest(data);
    key.verify_prehash(digest_algorithm, &prehash, signature)
}
