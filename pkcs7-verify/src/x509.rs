//! X.509 certificates and CRLs, decoded as borrowed views over their DER encoding.
//!
//! Only what the verification needs is decoded: the names and serial numbers are
//! kept as raw bytes so that they can be compared byte for byte, the public key
//! info is kept as is to be handed to the signature primitives, and fields that
//! are not used (validity, unique identifiers...) are skipped.

// Disable this lint: looks like the `Sequence` derive macro generates an impl that
// triggers this lint. It would be nice to find a fix for this in the `der` crate.
#![allow(single_use_lifetimes)]

use const_oid::db::rfc5912;
use der::asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef};
use der::{Decode, Reader, Sequence, Tag, TagMode, TagNumber};

/// X.509 `AlgorithmIdentifier` as defined in [RFC 5280 Section 4.1.1.2].
///
/// ```text
/// AlgorithmIdentifier  ::=  SEQUENCE  {
///      algorithm               OBJECT IDENTIFIER,
///      parameters              ANY DEFINED BY algorithm OPTIONAL  }
/// ```
///
/// [RFC 5280 Section 4.1.1.2]: https://tools.ietf.org/html/rfc5280#section-4.1.1.2
#[derive(Copy, Clone, Debug, Eq, PartialEq, Sequence)]
pub struct AlgorithmIdentifierRef<'a> {
    /// Algorithm OID, i.e. the `algorithm` field in the `AlgorithmIdentifier`
    /// ASN.1 schema.
    pub oid: ObjectIdentifier,

    /// Algorithm `parameters`.
    pub parameters: Option<AnyRef<'a>>,
}

/// X.509 `Extension` as defined in [RFC 5280 Section 4.1.2.9].
///
/// ```text
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING
/// }
/// ```
///
/// [RFC 5280 Section 4.1.2.9]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.2.9
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct ExtensionRef<'a> {
    /// Extension identifier.
    pub extn_id: ObjectIdentifier,

    /// Criticality of the extension.
    #[asn1(default = "Default::default")]
    pub critical: bool,

    /// DER encoded value of the extension.
    pub extn_value: OctetStringRef<'a>,
}

/// `BasicConstraints` extension as defined in [RFC 5280 Section 4.2.1.9].
///
/// ```text
/// BasicConstraints ::= SEQUENCE {
///      cA                      BOOLEAN DEFAULT FALSE,
///      pathLenConstraint       INTEGER (0..MAX) OPTIONAL }
/// ```
///
/// [RFC 5280 Section 4.2.1.9]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.9
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Sequence)]
pub struct BasicConstraints {
    /// Whether the subject is a CA.
    #[asn1(default = "Default::default")]
    pub ca: bool,

    /// Maximum number of intermediate certificates below this one.
    pub path_len_constraint: Option<u8>,
}

/// X.509 `TbsCertificate` as defined in [RFC 5280 Section 4.1]
///
/// ```text
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  Extensions OPTIONAL
/// }
/// ```
///
/// [RFC 5280 Section 4.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TbsCertificate<'a> {
    /// Version, 0 for v1 up to 2 for v3.
    pub version: u8,

    /// Content bytes of the serial number `INTEGER`.
    pub serial_number: &'a [u8],

    /// Signature algorithm, must match the one of the certificate.
    pub signature: AlgorithmIdentifierRef<'a>,

    /// DER encoding of the issuer `Name`, header included.
    pub issuer: &'a [u8],

    /// DER encoding of the subject `Name`, header included.
    pub subject: &'a [u8],

    /// `SubjectPublicKeyInfo`, decoded when the key is used.
    pub subject_public_key_info: AnyRef<'a>,

    /// Extensions, empty if absent.
    pub extensions: Vec<ExtensionRef<'a>>,
}

impl<'a> der::DecodeValue<'a> for TbsCertificate<'a> {
    fn decode_value<R: Reader<'a>>(decoder: &mut R, header: der::Header) -> der::Result<Self> {
        decoder.read_nested(header.length, |decoder| {
            let version = decoder
                .context_specific::<u8>(TagNumber::N0, TagMode::Explicit)?
                .unwrap_or_default();
            let serial_number = read_content(decoder, Tag::Integer)?;
            let signature = decoder.decode()?;
            let issuer = read_tlv(decoder, Tag::Sequence)?;
            // Validity, not checked.
            let _validity = read_tlv(decoder, Tag::Sequence)?;
            let subject = read_tlv(decoder, Tag::Sequence)?;
            let subject_public_key_info = decoder.decode()?;

            let mut extensions = Vec::new();
            while !decoder.is_finished() {
                if decoder.peek_tag()?
                    == (Tag::ContextSpecific {
                        constructed: true,
                        number: TagNumber::N3,
                    })
                {
                    extensions = decoder
                        .context_specific::<Vec<ExtensionRef<'a>>>(
                            TagNumber::N3,
                            TagMode::Explicit,
                        )?
                        .unwrap_or_default();
                } else {
                    // Unique identifiers
                    let _unused = decoder.tlv_bytes()?;
                }
            }

            Ok(Self {
                version,
                serial_number,
                signature,
                issuer,
                subject,
                subject_public_key_info,
                extensions,
            })
        })
    }
}

impl der::FixedTag for TbsCertificate<'_> {
    const TAG: Tag = Tag::Sequence;
}

/// X.509 certificates are defined in [RFC 5280 Section 4.1].
///
/// ```text
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signature            BIT STRING
/// }
/// ```
///
/// [RFC 5280 Section 4.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate<'a> {
    /// Decoded `TBSCertificate`.
    pub tbs_certificate: TbsCertificate<'a>,

    /// DER encoding of the `TBSCertificate`, the bytes covered by the signature.
    pub tbs_raw: &'a [u8],

    /// Algorithm used by the issuer to sign the certificate.
    pub signature_algorithm: AlgorithmIdentifierRef<'a>,

    /// Signature of the issuer.
    pub signature: BitStringRef<'a>,

    /// DER encoding of the whole certificate.
    pub raw: &'a [u8],
}

impl<'a> Certificate<'a> {
    /// Decode a DER encoded certificate.
    ///
    /// Trailing bytes after the certificate are rejected.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not a DER encoded certificate.
    pub fn from_der(der: &'a [u8]) -> der::Result<Self> {
        let mut reader = der::SliceReader::new(der)?;
        let raw = reader.tlv_bytes()?;
        let (tbs_certificate, tbs_raw, signature_algorithm, signature) =
            der::SliceReader::new(raw)?.sequence(|decoder| {
                let tbs_raw = decoder.tlv_bytes()?;
                let tbs_certificate = TbsCertificate::from_der(tbs_raw)?;
                let signature_algorithm = decoder.decode()?;
                let signature = decoder.decode()?;

                Ok((tbs_certificate, tbs_raw, signature_algorithm, signature))
            })?;
        reader.finish(Self {
            tbs_certificate,
            tbs_raw,
            signature_algorithm,
            signature,
            raw,
        })
    }

    /// DER encoding of the issuer name.
    #[must_use]
    pub fn issuer(&self) -> &'a [u8] {
        self.tbs_certificate.issuer
    }

    /// DER encoding of the subject name.
    #[must_use]
    pub fn subject(&self) -> &'a [u8] {
        self.tbs_certificate.subject
    }

    /// Content bytes of the serial number.
    #[must_use]
    pub fn serial_number(&self) -> &'a [u8] {
        self.tbs_certificate.serial_number
    }

    /// True if the subject of this certificate is the issuer of `other`.
    ///
    /// Names are compared byte for byte.
    #[must_use]
    pub fn is_issuer_of(&self, other: &Certificate) -> bool {
        self.subject() == other.issuer()
    }

    /// True if the certificate is self-issued.
    #[must_use]
    pub fn is_self_issued(&self) -> bool {
        self.subject() == self.issuer()
    }

    /// Whether the certificate may issue other certificates.
    ///
    /// v1 and v2 certificates have no extensions and are considered CAs. Otherwise,
    /// the `BasicConstraints` extension must be present with the `cA` flag set.
    #[must_use]
    pub fn is_ca(&self) -> bool {
        if self.tbs_certificate.version < 2 {
            return true;
        }

        self.tbs_certificate
            .extensions
            .iter()
            .find(|ext| ext.extn_id == rfc5912::ID_CE_BASIC_CONSTRAINTS)
            .and_then(|ext| BasicConstraints::from_der(ext.extn_value.as_bytes()).ok())
            .is_some_and(|constraints| constraints.ca)
    }
}

/// X.509 CRL as defined in [RFC 5280 Section 5.1].
///
/// ```text
/// CertificateList  ::=  SEQUENCE  {
///      tbsCertList          TBSCertList,
///      signatureAlgorithm   AlgorithmIdentifier,
///      signatureValue       BIT STRING  }
///
/// TBSCertList  ::=  SEQUENCE  {
///      version                 Version OPTIONAL,
///      signature               AlgorithmIdentifier,
///      issuer                  Name,
///      thisUpdate              Time,
///      nextUpdate              Time OPTIONAL,
///      revokedCertificates     SEQUENCE OF SEQUENCE  {
///           userCertificate         CertificateSerialNumber,
///           revocationDate          Time,
///           crlEntryExtensions      Extensions OPTIONAL
///      }  OPTIONAL,
///      crlExtensions           [0]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
///
/// We only decode what is needed to check revocation of a serial number.
///
/// [RFC 5280 Section 5.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-5.1
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Crl<'a> {
    /// DER encoding of the issuer `Name`, header included.
    pub issuer: &'a [u8],

    /// Content bytes of the serial numbers of the revoked certificates.
    pub revoked_serials: Vec<&'a [u8]>,

    /// DER encoding of the `TBSCertList`, the bytes covered by the signature.
    pub tbs_raw: &'a [u8],

    /// Algorithm used by the issuer to sign the CRL.
    pub signature_algorithm: AlgorithmIdentifierRef<'a>,

    /// Signature of the issuer.
    pub signature: BitStringRef<'a>,

    /// DER encoding of the whole CRL.
    pub raw: &'a [u8],
}

impl<'a> Crl<'a> {
    /// Decode a DER encoded CRL.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not a DER encoded CRL.
    pub fn from_der(der: &'a [u8]) -> der::Result<Self> {
        let mut reader = der::SliceReader::new(der)?;
        let raw = reader.tlv_bytes()?;
        let crl = der::SliceReader::new(raw)?.sequence(|decoder| {
            let tbs_raw = decoder.tlv_bytes()?;
            let (issuer, revoked_serials) =
                der::SliceReader::new(tbs_raw)?.sequence(decode_tbs_cert_list)?;
            let signature_algorithm = decoder.decode()?;
            let signature = decoder.decode()?;

            Ok(Self {
                issuer,
                revoked_serials,
                tbs_raw,
                signature_algorithm,
                signature,
                raw,
            })
        })?;
        reader.finish(crl)
    }

    /// True if the CRL lists the given serial number.
    #[must_use]
    pub fn is_revoked(&self, serial_number: &[u8]) -> bool {
        self.revoked_serials
            .iter()
            .any(|serial| *serial == serial_number)
    }
}

fn decode_tbs_cert_list<'a, R: Reader<'a>>(
    decoder: &mut R,
) -> der::Result<(&'a [u8], Vec<&'a [u8]>)> {
    if decoder.peek_tag()? == Tag::Integer {
        let _version: u8 = decoder.decode()?;
    }
    let _signature: AlgorithmIdentifierRef = decoder.decode()?;
    let issuer = read_tlv(decoder, Tag::Sequence)?;
    // thisUpdate
    let _this_update = decoder.tlv_bytes()?;

    let mut revoked_serials = Vec::new();
    while !decoder.is_finished() {
        match decoder.peek_tag()? {
            Tag::Sequence => {
                let entries = read_content(decoder, Tag::Sequence)?;
                let mut entries = der::SliceReader::new(entries)?;
                while !entries.is_finished() {
                    let serial = entries.sequence(|entry| {
                        let serial = read_content(entry, Tag::Integer)?;
                        // revocationDate and crlEntryExtensions
                        let _rest = entry.read_slice(entry.remaining_len())?;
                        Ok(serial)
                    })?;
                    revoked_serials.push(serial);
                }
            }
            // nextUpdate and crlExtensions
            _ => {
                let _unused = decoder.tlv_bytes()?;
            }
        }
    }

    Ok((issuer, revoked_serials))
}

/// Read a whole element with the given tag, header included.
fn read_tlv<'a, R: Reader<'a>>(decoder: &mut R, tag: Tag) -> der::Result<&'a [u8]> {
    let _tag = decoder.peek_tag()?.assert_eq(tag)?;
    decoder.tlv_bytes()
}

/// Read the content bytes of an element with the given tag.
fn read_content<'a, R: Reader<'a>>(decoder: &mut R, tag: Tag) -> der::Result<&'a [u8]> {
    let header = decoder.decode::<der::Header>()?;
    let _tag = header.tag.assert_eq(tag)?;
    decoder.read_slice(header.length)
}

/// Check that the signature algorithm of the signed part matches the outer one.
pub(crate) fn signature_algorithms_match(cert: &Certificate) -> bool {
    cert.tbs_certificate.signature.oid == cert.signature_algorithm.oid
}
