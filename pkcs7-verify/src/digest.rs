//! Digest algorithms accepted in signer infos and certificate signatures.
use const_oid::db::rfc5912;
use der::asn1::ObjectIdentifier;
use sha2::Digest;

/// Digest algorithm allowed by the verification profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-1, only available with the `sha1` feature.
    #[cfg(feature = "sha1")]
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestAlgorithm {
    /// All supported algorithms, in the order they are tried when the digest
    /// algorithm is not pinned.
    pub const ALL: &'static [Self] = &[
        #[cfg(feature = "sha1")]
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Algorithm identified by the given object identifier, if supported.
    #[must_use]
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            #[cfg(feature = "sha1")]
            rfc5912::ID_SHA_1 => Some(Self::Sha1),
            rfc5912::ID_SHA_256 => Some(Self::Sha256),
            rfc5912::ID_SHA_384 => Some(Self::Sha384),
            rfc5912::ID_SHA_512 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Object identifier of the algorithm.
    #[must_use]
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            #[cfg(feature = "sha1")]
            Self::Sha1 => rfc5912::ID_SHA_1,
            Self::Sha256 => rfc5912::ID_SHA_256,
            Self::Sha384 => rfc5912::ID_SHA_384,
            Self::Sha512 => rfc5912::ID_SHA_512,
        }
    }

    /// Compute the digest of the given data.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            #[cfg(feature = "sha1")]
            Self::Sha1 => sha1::Sha1::digest(data).to_vec(),
            Self::Sha256 => sha2::Sha256::digest(data).to_vec(),
            Self::Sha384 => sha2::Sha384::digest(data).to_vec(),
            Self::Sha512 => sha2::Sha512::digest(data).to_vec(),
        }
    }
}
