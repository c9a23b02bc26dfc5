//! Verification of a PKCS#7 message against a trusted root and a payload.
use crate::chain::ChainVerifier;
use crate::content_info::{self, Pkcs7Message};
use crate::digest::DigestAlgorithm;
use crate::error::Pkcs7Error;
use crate::params::VerifyParams;
use crate::signature::{signature_algorithm, PublicKey};
use crate::signed_data::SignedData;
use crate::signer_info::SignerInfo;
use crate::x509::Certificate;

/// Verifier of PKCS#7 messages.
///
/// A message is authentic if:
///
/// - the certificate of its first signer is found in the message,
/// - this certificate chains up to the trusted root,
/// - the signature of the signer is valid for the payload.
#[derive(Clone, Debug, Default)]
pub struct Verifier {
    params: VerifyParams,
}

impl Verifier {
    /// Create a verifier using the given parameters.
    #[must_use]
    pub fn new(params: VerifyParams) -> Self {
        Self { params }
    }

    /// Parameters used by the verifier.
    #[must_use]
    pub fn params(&self) -> &VerifyParams {
        &self.params
    }

    /// Verify a message, returning true if the payload is authentic.
    ///
    /// See [`Verifier::check`] for details on the arguments.
    #[must_use]
    pub fn verify(&self, message: &[u8], trusted_root: &[u8], payload: &[u8]) -> bool {
        match self.check(message, trusted_root, payload) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("message rejected: {err}");
                false
            }
        }
    }

    /// Verify a message, returning the reason of the rejection if the payload is
    /// not authentic.
    ///
    /// - `message` is the DER encoding of the message, either a `ContentInfo` or a
    ///   bare `SignedData`.
    /// - `trusted_root` is the DER encoding of the trusted root certificate.
    /// - `payload` are the signed bytes, detached from the message.
    ///
    /// # Errors
    ///
    /// See [`Pkcs7Error`].
    pub fn check(
        &self,
        message: &[u8],
        trusted_root: &[u8],
        payload: &[u8],
    ) -> Result<(), Pkcs7Error> {
        let message = content_info::wrap(message)?;
        let message = Pkcs7Message::from_der(&message)?;
        let root = Certificate::from_der(trusted_root)?;

        self.check_message(&message, &root, payload)
    }

    /// Verify an already decoded message.
    ///
    /// # Errors
    ///
    /// See [`Pkcs7Error`].
    pub fn check_message(
        &self,
        message: &Pkcs7Message,
        trusted_root: &Certificate,
        payload: &[u8],
    ) -> Result<(), Pkcs7Error> {
        let signed_data = &message.signed_data;
        let store = &signed_data.certificates;

        let signer = signed_data
            .signer_infos
            .first()
            .ok_or(Pkcs7Error::SignerNotFound)?;
        let (index, cert) = store
            .find_signer(signer)
            .ok_or(Pkcs7Error::SignerNotFound)?;
        log::debug!("signer certificate found at index {index}");

        if !ChainVerifier::new(store, &signed_data.crls, trusted_root, &self.params)
            .is_trusted(index)
        {
            return Err(Pkcs7Error::ChainUntrusted);
        }

        let valid = if self.params.verify_all_certificates {
            store
                .iter()
                .any(|cert| self.verify_signature(signed_data, signer, cert, payload))
        } else {
            self.verify_signature(signed_data, signer, cert, payload)
        };

        if valid {
            Ok(())
        } else {
            Err(Pkcs7Error::SignatureMismatch)
        }
    }

    /// Check the signature of a signer with the key of a certificate.
    fn verify_signature(
        &self,
        signed_data: &SignedData,
        signer: &SignerInfo,
        cert: &Certificate,
        payload: &[u8],
    ) -> bool {
        let Some((kind, _)) = signature_algorithm(&signer.signature_algorithm) else {
            log::debug!(
                "unsupported signature algorithm {}",
                signer.signature_algorithm.oid
            );
            return false;
        };
        let Some(key) = PublicKey::from_certificate(cert, &self.params) else {
            return false;
        };
        if key.kind() != kind {
            return false;
        }

        let algorithms = if self.params.digest_fallback {
            DigestAlgorithm::ALL
        } else {
            std::slice::from_ref(&signer.digest_algorithm)
        };

        algorithms.iter().any(|algorithm| {
            log::debug!("checking signature with {algorithm:?}");
            verify_with_digest(signed_data, signer, &key, *algorithm, payload)
        })
    }
}

fn verify_with_digest(
    signed_data: &SignedData,
    signer: &SignerInfo,
    key: &PublicKey,
    algorithm: DigestAlgorithm,
    payload: &[u8],
) -> bool {
    let digest = algorithm.digest(payload);

    let prehash = match signer.signed_attributes_der() {
        Some(der) => {
            if !signer.check_attributes(&signed_data.content_type, &digest) {
                return false;
            }
            algorithm.digest(&der)
        }
        None => digest,
    };

    key.verify_prehash(algorithm, &prehash, signer.signature)
}

/// Verify a message with the default parameters.
///
/// Returns true if the payload is authentic: the message is signed by a
/// certificate that chains up to `trusted_root`, and its signature covers the
/// payload. Any error, whether the message is malformed or not trusted, returns
/// false.
///
/// Use [`Verifier`] to change the parameters or get the reason of a rejection.
#[must_use]
pub fn verify(message: &[u8], trusted_root: &[u8], payload: &[u8]) -> bool {
    Verifier::default().verify(message, trusted_root, payload)
}
