//! Parameters applicable to a verification.

/// Parameters used to configure a verification.
#[derive(Clone, Debug)]
pub struct VerifyParams {
    /// Try every supported digest algorithm instead of the declared one.
    pub(crate) digest_fallback: bool,

    /// Try the signature against every certificate of the message.
    pub(crate) verify_all_certificates: bool,

    /// Max number of intermediate certificates between the signer and the root.
    pub(crate) max_chain_depth: usize,

    /// Minimum size of the modulus of RSA keys, in bits.
    pub(crate) min_rsa_key_bits: usize,
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            digest_fallback: false,
            verify_all_certificates: true,
            max_chain_depth: 8,
            min_rsa_key_bits: 1024,
        }
    }
}

impl VerifyParams {
    /// Try every supported digest algorithm when verifying the signature.
    ///
    /// By default, the signature is only checked with the digest algorithm declared
    /// by the signer. When enabled, SHA-1 (if the `sha1` feature is enabled), SHA-256,
    /// SHA-384 and SHA-512 are tried in that order, and the first one validating the
    /// signature is accepted. This accepts messages with a mismatched digest algorithm
    /// declaration, at the cost of the algorithm no longer being pinned.
    ///
    /// The default value is `false`.
    #[must_use]
    pub fn digest_fallback(mut self, digest_fallback: bool) -> Self {
        self.digest_fallback = digest_fallback;
        self
    }

    /// Check the signature against every certificate of the message.
    ///
    /// Once the certificate matching the signer has been validated against the
    /// trusted root, the signature is checked with the public key of every
    /// certificate embedded in the message, and not only with the one of the
    /// matched certificate. Setting this to `false` only uses the matched certificate.
    ///
    /// When enabled, this weakens the verification: the other certificates of the
    /// message are not checked against the trusted root, so a signature made with
    /// the key of any of them is accepted, as long as the certificate named by the
    /// signer is trusted. Anyone able to add a certificate to a trusted message can
    /// then sign arbitrary payloads.
    ///
    /// The default value is `true`.
    #[must_use]
    pub fn verify_all_certificates(mut self, verify_all_certificates: bool) -> Self {
        self.verify_all_certificates = verify_all_certificates;
        self
    }

    /// Maximum number of intermediate certificates between the signer and the root.
    ///
    /// Longer chains are rejected.
    ///
    /// The default value is `8`.
    #[must_use]
    pub fn max_chain_depth(mut self, max_chain_depth: usize) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    /// Minimum size in bits of RSA keys.
    ///
    /// This applies both to the keys validating certificates and to the signer keys.
    ///
    /// The default value is `1024`.
    #[must_use]
    pub fn min_rsa_key_bits(mut self, min_rsa_key_bits: usize) -> Self {
        self.min_rsa_key_bits = min_rsa_key_bits;
        self
    }
}
