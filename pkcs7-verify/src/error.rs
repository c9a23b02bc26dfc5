//! Errors raised while decoding or verifying a PKCS#7 message.
use der::asn1::ObjectIdentifier;

/// Error raised while decoding or verifying a PKCS#7 message.
///
/// The boolean API ([`crate::verify`]) collapses all of those into `false`.
/// [`crate::Verifier::check`] returns them for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pkcs7Error {
    /// Malformed DER: wrong tag, truncated buffer, length overrun, trailing data...
    Parse(der::Error),

    /// The input does not fit in the 16-bit lengths of the synthesized
    /// `ContentInfo` header, or an export buffer would overflow its counters.
    InputTooLarge,

    /// The `ContentInfo` does not hold a `SignedData`.
    UnsupportedContentType(ObjectIdentifier),

    /// The digest algorithm is not in the allow-list.
    UnsupportedDigestAlgorithm(ObjectIdentifier),

    /// No certificate of the message matches the issuer and serial number of the signer.
    SignerNotFound,

    /// The signer certificate does not chain up to the trusted root.
    ChainUntrusted,

    /// No combination of certificate and digest algorithm validates the signature.
    SignatureMismatch,
}

impl From<der::Error> for Pkcs7Error {
    fn from(err: der::Error) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for Pkcs7Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed DER: {err}"),
            Self::InputTooLarge => write!(f, "input too large"),
            Self::UnsupportedContentType(oid) => write!(f, "unsupported content type {oid}"),
            Self::UnsupportedDigestAlgorithm(oid) => {
                write!(f, "unsupported digest algorithm {oid}")
            }
            Self::SignerNotFound => write!(f, "no certificate matches the signer"),
            Self::ChainUntrusted => write!(f, "signer certificate is not trusted"),
            Self::SignatureMismatch => write!(f, "signature does not match"),
        }
    }
}

impl std::error::Error for Pkcs7Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
