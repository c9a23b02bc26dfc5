//! Validation of the certificate of a signer against a trusted root.
//!
//! The chain is built by matching the issuer of a certificate with the subject
//! of the certificates of the message, byte for byte. A certificate of the
//! message appears at most once in a candidate chain, and the number of
//! intermediate certificates is bounded, so that cycles and long chains are
//! rejected.
//!
//! Validity periods are not checked.
use crate::params::VerifyParams;
use crate::signature::{verify_certificate_signature, verify_crl_signature};
use crate::store::CertificateStore;
use crate::x509::{Certificate, Crl};

/// Checks that certificates of a message chain up to a trusted root.
#[derive(Debug)]
pub(crate) struct ChainVerifier<'a> {
    store: &'a CertificateStore<'a>,
    crls: &'a [Crl<'a>],
    root: &'a Certificate<'a>,
    params: &'a VerifyParams,
}

impl<'a> ChainVerifier<'a> {
    pub(crate) fn new(
        store: &'a CertificateStore<'a>,
        crls: &'a [Crl<'a>],
        root: &'a Certificate<'a>,
        params: &'a VerifyParams,
    ) -> Self {
        Self {
            store,
            crls,
            root,
            params,
        }
    }

    /// Check that the certificate at `index` in the store is trusted.
    pub(crate) fn is_trusted(&self, index: usize) -> bool {
        let Some(cert) = self.store.get(index) else {
            return false;
        };

        let mut visited = vec![index];
        self.walk(cert, &mut visited, 0)
    }

    fn walk(&self, cert: &Certificate<'a>, visited: &mut Vec<usize>, depth: usize) -> bool {
        if self.is_issued_by_root(cert) {
            return true;
        }

        if depth >= self.params.max_chain_depth {
            log::warn!(
                "no trusted root found within {} intermediate certificates",
                self.params.max_chain_depth
            );
            return false;
        }

        for (index, issuer) in self.store.issuers_of(cert) {
            // The root has already been checked, and must not be used to bypass
            // its own revocation lists.
            if visited.contains(&index) || issuer.raw == self.root.raw {
                continue;
            }
            if !issuer.is_ca() {
                log::debug!("certificate {index} is not a CA, skipping it as an issuer");
                continue;
            }
            if !verify_certificate_signature(cert, issuer, self.params) {
                continue;
            }

            log::debug!("accepting certificate {index} as an intermediate");
            visited.push(index);
            if self.walk(issuer, visited, depth + 1) {
                return true;
            }
            // The issuer may still be reachable through a shorter path.
            let _r = visited.pop();
        }

        false
    }

    /// Check if the certificate is the root, or is directly signed by the root.
    fn is_issued_by_root(&self, cert: &Certificate) -> bool {
        if cert.raw == self.root.raw {
            return true;
        }

        if !self.root.is_issuer_of(cert)
            || !verify_certificate_signature(cert, self.root, self.params)
        {
            return false;
        }

        if self.is_revoked(cert) {
            log::warn!("certificate has been revoked by the trusted root");
            return false;
        }

        true
    }

    /// Check if a CRL signed by the root revokes the certificate.
    fn is_revoked(&self, cert: &Certificate) -> bool {
        self.crls.iter().any(|crl| {
            crl.issuer == self.root.subject()
                && crl.is_revoked(cert.serial_number())
                && verify_crl_signature(crl, self.root, self.params)
        })
    }
}
