//! `SignerInfo` structure, as defined in [RFC 2315 Section 9.2].
//!
//! ```text
//! SignerInfo ::= SEQUENCE {
//!   version Version,
//!   issuerAndSerialNumber IssuerAndSerialNumber,
//!   digestAlgorithm DigestAlgorithmIdentifier,
//!   authenticatedAttributes
//!     [0] IMPLICIT Attributes OPTIONAL,
//!   digestEncryptionAlgorithm
//!     DigestEncryptionAlgorithmIdentifier,
//!   encryptedDigest EncryptedDigest,
//!   unauthenticatedAttributes
//!     [1] IMPLICIT Attributes OPTIONAL }
//! ```
//!
//! [RFC 2315 Section 9.2]: https://datatracker.ietf.org/doc/html/rfc2315#section-9.2
use const_oid::db::rfc5911::{ID_CONTENT_TYPE, ID_MESSAGE_DIGEST};
use der::asn1::{AnyRef, ObjectIdentifier};
use der::{Tag, TagNumber, Tagged};

use crate::cursor::DerCursor;
use crate::digest::DigestAlgorithm;
use crate::error::Pkcs7Error;
use crate::x509::AlgorithmIdentifierRef;

const AUTHENTICATED_ATTRIBUTES_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N0,
};

const UNAUTHENTICATED_ATTRIBUTES_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N1,
};

/// X.501 `Attribute`.
///
/// ```text
/// Attribute ::= SEQUENCE {
///     type             AttributeType,
///     values    SET OF AttributeValue
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRef<'a> {
    /// Type of the attribute.
    pub oid: ObjectIdentifier,

    /// Values of the attribute.
    pub values: Vec<AnyRef<'a>>,
}

impl<'a> AttributeRef<'a> {
    fn decode(mut cursor: DerCursor<'a>) -> Result<Self, Pkcs7Error> {
        let oid = cursor.read_oid()?;
        let mut set = cursor.read_nested(Tag::Set)?;
        cursor.finish()?;

        let mut values = Vec::new();
        while !set.is_finished() {
            values.push(set.decode()?);
        }

        Ok(Self { oid, values })
    }
}

/// Information about one signer of a `SignedData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerInfo<'a> {
    /// Version of the structure.
    pub version: i64,

    /// DER encoding of the issuer `Name` of the signer certificate, header included.
    pub issuer: &'a [u8],

    /// Content bytes of the serial number of the signer certificate.
    pub serial_number: &'a [u8],

    /// Digest algorithm declared by the signer.
    pub digest_algorithm: DigestAlgorithm,

    /// DER encoding of the authenticated attributes, with its `[0]` header.
    pub auth_attributes: Option<&'a [u8]>,

    /// Decoded authenticated attributes, empty if absent.
    pub attributes: Vec<AttributeRef<'a>>,

    /// Algorithm used to sign the digest.
    pub signature_algorithm: AlgorithmIdentifierRef<'a>,

    /// The signature.
    pub signature: &'a [u8],
}

impl<'a> SignerInfo<'a> {
    /// Decode a `SignerInfo`, from a cursor over the content of its `SEQUENCE`.
    ///
    /// # Errors
    ///
    /// Fails if the structure is malformed, or if the digest algorithm is not supported.
    pub fn decode(mut cursor: DerCursor<'a>) -> Result<Self, Pkcs7Error> {
        let version = cursor.read_integer()?;

        let mut issuer_and_serial = cursor.read_nested(Tag::Sequence)?;
        let issuer = issuer_and_serial.read_raw(Tag::Sequence)?;
        let serial_number = issuer_and_serial.read_content(Tag::Integer)?;
        issuer_and_serial.finish()?;

        let digest_algorithm: AlgorithmIdentifierRef = cursor.decode()?;
        let digest_algorithm = DigestAlgorithm::from_oid(&digest_algorithm.oid)
            .ok_or(Pkcs7Error::UnsupportedDigestAlgorithm(digest_algorithm.oid))?;

        let mut auth_attributes = None;
        let mut attributes = Vec::new();
        if cursor.peek_tag() == Some(AUTHENTICATED_ATTRIBUTES_TAG) {
            let raw = cursor.read_raw(AUTHENTICATED_ATTRIBUTES_TAG)?;
            let mut attrs = DerCursor::new(raw)?.read_nested(AUTHENTICATED_ATTRIBUTES_TAG)?;
            while !attrs.is_finished() {
                attributes.push(AttributeRef::decode(attrs.read_nested(Tag::Sequence)?)?);
            }
            auth_attributes = Some(raw);
        }

        let signature_algorithm = cursor.decode()?;
        let signature = cursor.read_octet_string()?;

        if cursor.peek_tag() == Some(UNAUTHENTICATED_ATTRIBUTES_TAG) {
            cursor.skip()?;
        }
        cursor.finish()?;

        Ok(Self {
            version,
            issuer,
            serial_number,
            digest_algorithm,
            auth_attributes,
            attributes,
            signature_algorithm,
            signature,
        })
    }

    /// First value of an authenticated attribute.
    #[must_use]
    pub fn get_attribute(&self, oid: &ObjectIdentifier) -> Option<AnyRef<'a>> {
        let attr = self.attributes.iter().find(|attr| &attr.oid == oid)?;

        attr.values.first().copied()
    }

    /// Content of the `messageDigest` authenticated attribute.
    #[must_use]
    pub fn get_message_digest(&self) -> Option<&'a [u8]> {
        self.get_attribute(&ID_MESSAGE_DIGEST)
            .filter(|value| value.tag() == Tag::OctetString)
            .map(AnyRef::value)
    }

    /// Value of the `contentType` authenticated attribute.
    #[must_use]
    pub fn get_content_type(&self) -> Option<ObjectIdentifier> {
        self.get_attribute(&ID_CONTENT_TYPE)
            .and_then(|value| value.decode_as().ok())
    }

    /// Bytes covered by the signature, when authenticated attributes are present.
    ///
    /// This is the encoding of the attributes with a `SET OF` tag in place of
    /// the `[0]` implicit tag. The bytes of the message are left untouched.
    #[must_use]
    pub fn signed_attributes_der(&self) -> Option<Vec<u8>> {
        let mut res = self.auth_attributes?.to_vec();
        if let Some(tag) = res.first_mut() {
            *tag = 0x31;
        }
        Some(res)
    }

    /// Check the authenticated attributes against the digest of the payload.
    ///
    /// The `messageDigest` attribute is mandatory and must equal `digest`. The
    /// `contentType` attribute, if present, must equal `content_type`.
    pub(crate) fn check_attributes(&self, content_type: &ObjectIdentifier, digest: &[u8]) -> bool {
        if let Some(oid) = self.get_content_type() {
            if &oid != content_type {
                log::debug!("content type attribute {oid} does not match {content_type}");
                return false;
            }
        }

        self.get_message_digest() == Some(digest)
    }
}
