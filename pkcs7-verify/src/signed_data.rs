//! `SignedData` structure, as defined in [RFC 2315 Section 9.1].
//!
//! ```text
//! SignedData ::= SEQUENCE {
//!   version Version,
//!   digestAlgorithms DigestAlgorithmIdentifiers,
//!   contentInfo ContentInfo,
//!   certificates
//!      [0] IMPLICIT ExtendedCertificatesAndCertificates
//!        OPTIONAL,
//!   crls
//!     [1] IMPLICIT CertificateRevocationLists OPTIONAL,
//!   signerInfos SignerInfos }
//! ```
//!
//! [RFC 2315 Section 9.1]: https://datatracker.ietf.org/doc/html/rfc2315#section-9.1
use der::asn1::ObjectIdentifier;
use der::{Tag, TagNumber};

use crate::cursor::DerCursor;
use crate::digest::DigestAlgorithm;
use crate::error::Pkcs7Error;
use crate::signer_info::SignerInfo;
use crate::store::CertificateStore;
use crate::x509::{AlgorithmIdentifierRef, Certificate, Crl};

const CONTENT_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N0,
};

const CERTIFICATES_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N0,
};

const CRLS_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N1,
};

/// Decoded `SignedData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedData<'a> {
    /// Version of the structure, always 1.
    pub version: i64,

    /// First digest algorithm of the `digestAlgorithms` set.
    pub digest_algorithm: DigestAlgorithm,

    /// Type of the signed content.
    pub content_type: ObjectIdentifier,

    /// Signed content, if attached to the message.
    ///
    /// This is the content of the `OCTET STRING` for a `data` content, and the
    /// whole DER encoding of the content otherwise.
    pub content: Option<&'a [u8]>,

    /// Certificates of the message, in order.
    pub certificates: CertificateStore<'a>,

    /// Certificate revocation lists of the message.
    pub crls: Vec<Crl<'a>>,

    /// Signers of the message.
    ///
    /// The first signer is always decoded strictly. The following ones are
    /// dropped if they cannot be decoded.
    pub signer_infos: Vec<SignerInfo<'a>>,
}

impl<'a> SignedData<'a> {
    /// Decode a `SignedData`, from a cursor over the content of its `SEQUENCE`.
    ///
    /// # Errors
    ///
    /// Fails if any part of the structure is malformed, if the version is not 1,
    /// or if the digest algorithm of the message or of its first signer is not
    /// supported.
    pub fn decode(mut cursor: DerCursor<'a>) -> Result<Self, Pkcs7Error> {
        let version = cursor.read_integer()?;
        if version != 1 {
            log::debug!("unsupported signed data version {version}");
            return Err(Tag::Integer.value_error().into());
        }

        let digest_algorithm = decode_digest_algorithms(cursor.read_nested(Tag::Set)?)?;

        let (content_type, content) = decode_content_info(cursor.read_nested(Tag::Sequence)?)?;

        let mut certificates = CertificateStore::new();
        if cursor.peek_tag() == Some(CERTIFICATES_TAG) {
            let mut certs = cursor.read_nested(CERTIFICATES_TAG)?;
            while !certs.is_finished() {
                certificates.push(Certificate::from_der(certs.read_raw(Tag::Sequence)?)?);
            }
        }

        let mut crls = Vec::new();
        if cursor.peek_tag() == Some(CRLS_TAG) {
            let mut list = cursor.read_nested(CRLS_TAG)?;
            while !list.is_finished() {
                crls.push(Crl::from_der(list.read_raw(Tag::Sequence)?)?);
            }
        }

        // Only the first signer is used for verification: the others are kept
        // when they can be decoded, and dropped otherwise.
        let mut signer_infos = Vec::new();
        let mut infos = cursor.read_nested(Tag::Set)?;
        if !infos.is_finished() {
            signer_infos.push(SignerInfo::decode(infos.read_nested(Tag::Sequence)?)?);
        }
        while !infos.is_finished() {
            match SignerInfo::decode(infos.read_nested(Tag::Sequence)?) {
                Ok(info) => signer_infos.push(info),
                Err(err) => log::debug!("ignoring invalid signer info: {err}"),
            }
        }
        cursor.finish()?;

        log::debug!(
            "decoded signed data with {} certificates, {} crls and {} signers",
            certificates.len(),
            crls.len(),
            signer_infos.len()
        );

        Ok(Self {
            version,
            digest_algorithm,
            content_type,
            content,
            certificates,
            crls,
            signer_infos,
        })
    }
}

fn decode_digest_algorithms(mut cursor: DerCursor<'_>) -> Result<DigestAlgorithm, Pkcs7Error> {
    if cursor.is_finished() {
        return Err(Tag::Set.value_error().into());
    }

    let first: AlgorithmIdentifierRef = cursor.decode()?;
    let digest_algorithm = DigestAlgorithm::from_oid(&first.oid)
        .ok_or(Pkcs7Error::UnsupportedDigestAlgorithm(first.oid))?;

    // Other algorithms are not used.
    while !cursor.is_finished() {
        let _other: AlgorithmIdentifierRef = cursor.decode()?;
    }

    Ok(digest_algorithm)
}

fn decode_content_info(
    mut cursor: DerCursor<'_>,
) -> Result<(ObjectIdentifier, Option<&[u8]>), Pkcs7Error> {
    let content_type = cursor.read_oid()?;

    let content = if cursor.peek_tag() == Some(CONTENT_TAG) {
        let mut explicit = cursor.read_nested(CONTENT_TAG)?;
        let content = match explicit.peek_tag() {
            Some(Tag::OctetString) => explicit.read_octet_string()?,
            Some(tag) => explicit.read_raw(tag)?,
            None => return Err(CONTENT_TAG.length_error().into()),
        };
        explicit.finish()?;
        Some(content)
    } else {
        None
    };
    cursor.finish()?;

    Ok((content_type, content))
}
