//! `ContentInfo` envelope of a PKCS#7 message.
//!
//! ```text
//! ContentInfo ::= SEQUENCE {
//!   contentType ContentType,
//!   content [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL }
//! ```
//!
//! Messages are accepted either wrapped in this envelope or as a bare
//! `SignedData`. A bare message is wrapped by prepending a fixed size header,
//! which uses two-bytes long form lengths.
use std::borrow::Cow;

use der::asn1::ObjectIdentifier;
use der::{Tag, TagNumber};

use crate::cursor::DerCursor;
use crate::error::Pkcs7Error;
use crate::signed_data::SignedData;

/// OID of the PKCS#7 `signedData` content type, 1.2.840.113549.1.7.2.
pub const SIGNED_DATA_OID: ObjectIdentifier = const_oid::db::rfc5911::ID_SIGNED_DATA;

/// Encoding of the `signedData` OID, without its header.
const SIGNED_DATA_OID_BYTES: [u8; 9] = [0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02];

/// Size of the header prepended to a bare `SignedData`.
const WRAP_HEADER_LEN: usize = 19;

/// Size of the part of the header following the outer length.
const WRAP_INNER_HEADER_LEN: usize = 15;

/// Check if the bytes start with a `ContentInfo` header for a `SignedData`.
///
/// Only the fixed layout produced by [`wrap`] is recognized: the outer
/// `SEQUENCE` and the `[0]` element must both use a two-bytes length.
#[must_use]
pub fn is_wrapped(data: &[u8]) -> bool {
    matches!(
        data.get(..17),
        Some([0x30, 0x82, _, _, 0x06, 0x09, oid @ .., 0xA0, 0x82]) if *oid == SIGNED_DATA_OID_BYTES
    )
}

/// Wrap a bare `SignedData` into a `ContentInfo`.
///
/// If the data is already wrapped, it is returned as is.
///
/// # Errors
///
/// Fails with [`Pkcs7Error::InputTooLarge`] if the data is too big for the
/// lengths of the header.
pub fn wrap(data: &[u8]) -> Result<Cow<'_, [u8]>, Pkcs7Error> {
    if is_wrapped(data) {
        return Ok(Cow::Borrowed(data));
    }

    let inner_len = u16::try_from(data.len()).map_err(|_| Pkcs7Error::InputTooLarge)?;
    let outer_len = u16::try_from(data.len() + WRAP_INNER_HEADER_LEN)
        .map_err(|_| Pkcs7Error::InputTooLarge)?;

    let mut res = Vec::with_capacity(WRAP_HEADER_LEN + data.len());
    res.push(0x30);
    res.push(0x82);
    res.extend(outer_len.to_be_bytes());
    res.push(0x06);
    res.push(0x09);
    res.extend(SIGNED_DATA_OID_BYTES);
    res.push(0xA0);
    res.push(0x82);
    res.extend(inner_len.to_be_bytes());
    res.extend(data);

    Ok(Cow::Owned(res))
}

/// Strip the `ContentInfo` header added by [`wrap`].
///
/// Bytes that are not wrapped are returned as is.
///
/// # Errors
///
/// Fails if the header declares more bytes than available.
pub fn unwrap(data: &[u8]) -> Result<&[u8], Pkcs7Error> {
    if !is_wrapped(data) {
        return Ok(data);
    }

    let Some(&[hi, lo]) = data.get(17..WRAP_HEADER_LEN) else {
        return Err(Tag::Sequence.length_error().into());
    };
    let len = usize::from(u16::from_be_bytes([hi, lo]));

    data.get(WRAP_HEADER_LEN..WRAP_HEADER_LEN + len)
        .ok_or_else(|| Tag::Sequence.length_error().into())
}

/// A decoded PKCS#7 message.
#[derive(Clone, Debug)]
pub struct Pkcs7Message<'a> {
    /// Type of the content, always [`SIGNED_DATA_OID`].
    pub content_type: ObjectIdentifier,

    /// The signed data.
    pub signed_data: SignedData<'a>,
}

impl<'a> Pkcs7Message<'a> {
    /// Decode a `ContentInfo` holding a `SignedData`.
    ///
    /// Bytes following the `ContentInfo` are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`Pkcs7Error::UnsupportedContentType`] if the content is not a
    /// `SignedData`, before anything else is decoded, or with another error if
    /// the `SignedData` is invalid.
    pub fn from_der(der: &'a [u8]) -> Result<Self, Pkcs7Error> {
        let mut cursor = DerCursor::new(der)?;
        let mut content_info = cursor.read_nested(Tag::Sequence)?;

        let content_type = content_info.read_oid()?;
        if content_type != SIGNED_DATA_OID {
            log::debug!("rejecting content type {content_type}");
            return Err(Pkcs7Error::UnsupportedContentType(content_type));
        }

        let mut explicit = content_info.read_nested(Tag::ContextSpecific {
            constructed: true,
            number: TagNumber::N0,
        })?;
        content_info.finish()?;

        let signed_data = SignedData::decode(explicit.read_nested(Tag::Sequence)?)?;
        explicit.finish()?;

        Ok(Self {
            content_type,
            signed_data,
        })
    }
}
