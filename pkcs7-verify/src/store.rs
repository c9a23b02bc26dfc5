//! Certificates embedded in a `SignedData`.
use crate::signer_info::SignerInfo;
use crate::x509::Certificate;

/// Ordered collection of the certificates of a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateStore<'a> {
    certs: Vec<Certificate<'a>>,
}

impl<'a> CertificateStore<'a> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a certificate at the end of the store.
    pub fn push(&mut self, cert: Certificate<'a>) {
        self.certs.push(cert);
    }

    /// Number of certificates in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.certs.len()
    }

    /// True if the store holds no certificate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }

    /// Certificate at the given position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Certificate<'a>> {
        self.certs.get(index)
    }

    /// Iterate over the certificates, in the order of the message.
    pub fn iter(&self) -> std::slice::Iter<'_, Certificate<'a>> {
        self.certs.iter()
    }

    /// Find the certificate of a signer.
    ///
    /// This is the first certificate whose issuer and serial number are
    /// identical, byte for byte, to the ones referenced by the signer.
    #[must_use]
    pub fn find_signer(&self, signer: &SignerInfo) -> Option<(usize, &Certificate<'a>)> {
        self.certs.iter().enumerate().find(|(_, cert)| {
            cert.issuer() == signer.issuer && cert.serial_number() == signer.serial_number
        })
    }

    /// Certificates of the store issuing `cert`, with their indexes.
    pub(crate) fn issuers_of<'s>(
        &'s self,
        cert: &'s Certificate<'a>,
    ) -> impl Iterator<Item = (usize, &'s Certificate<'a>)> + 's {
        self.certs
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| candidate.is_issuer_of(cert))
    }

    /// Certificate at `index` followed by its issuers, as found in the store.
    ///
    /// At each step, the first certificate of the store issuing the previous one
    /// is selected. The walk stops on a self-issued certificate, or when no
    /// issuer is found. A certificate is never returned twice.
    #[must_use]
    pub fn chain(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.certs.get(index).map(|cert| (index, cert));

        while let Some((index, cert)) = current {
            chain.push(index);
            if cert.is_self_issued() {
                break;
            }
            current = self
                .issuers_of(cert)
                .find(|(index, _)| !chain.contains(index));
        }

        chain
    }
}

impl<'s, 'a> IntoIterator for &'s CertificateStore<'a> {
    type Item = &'s Certificate<'a>;
    type IntoIter = std::slice::Iter<'s, Certificate<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.certs.iter()
    }
}
