//! Minimal DER reader over a bounded byte slice.
//!
//! Every read checks the tag and the declared length against the bytes that
//! remain: a malformed or truncated input yields a [`Pkcs7Error::Parse`], never a
//! read past the end of the slice.
use der::asn1::{ObjectIdentifier, OctetStringRef};
use der::{Decode, Header, Length, Reader, SliceReader, Tag};

use crate::error::Pkcs7Error;

/// Cursor reading DER elements one after the other.
#[derive(Clone, Debug)]
pub struct DerCursor<'a> {
    bytes: &'a [u8],
    reader: SliceReader<'a>,
}

impl<'a> DerCursor<'a> {
    /// Create a cursor over the given bytes.
    ///
    /// # Errors
    ///
    /// Fails if the slice is longer than what DER lengths can express.
    pub fn new(bytes: &'a [u8]) -> Result<Self, Pkcs7Error> {
        Ok(Self {
            bytes,
            reader: SliceReader::new(bytes)?,
        })
    }

    /// Read the header of an element, check its tag and return its content length.
    ///
    /// The cursor is left on the first byte of the content.
    ///
    /// # Errors
    ///
    /// Fails if the tag differs from `expected_tag` or if the declared length
    /// overruns the remaining bytes.
    pub fn read_tag_length(&mut self, expected_tag: Tag) -> Result<usize, Pkcs7Error> {
        let length = self.read_header(expected_tag)?;
        Ok(usize::try_from(length)?)
    }

    /// Read an element and return its content bytes.
    ///
    /// # Errors
    ///
    /// See [`DerCursor::read_tag_length`].
    pub fn read_content(&mut self, expected_tag: Tag) -> Result<&'a [u8], Pkcs7Error> {
        let length = self.read_header(expected_tag)?;
        Ok(self.reader.read_slice(length)?)
    }

    /// Read a constructed element and return a cursor over its content.
    ///
    /// # Errors
    ///
    /// See [`DerCursor::read_tag_length`].
    pub fn read_nested(&mut self, expected_tag: Tag) -> Result<DerCursor<'a>, Pkcs7Error> {
        DerCursor::new(self.read_content(expected_tag)?)
    }

    /// Read a whole element, returning its header and content bytes.
    ///
    /// # Errors
    ///
    /// See [`DerCursor::read_tag_length`].
    pub fn read_raw(&mut self, expected_tag: Tag) -> Result<&'a [u8], Pkcs7Error> {
        let start = usize::try_from(self.reader.position())?;
        let _content = self.read_content(expected_tag)?;
        let end = usize::try_from(self.reader.position())?;

        self.bytes
            .get(start..end)
            .ok_or_else(|| expected_tag.length_error().into())
    }

    /// Read an `INTEGER` that fits in a `i64`.
    ///
    /// # Errors
    ///
    /// Fails on a wrong tag, a truncated input or an integer that is too large.
    pub fn read_integer(&mut self) -> Result<i64, Pkcs7Error> {
        Ok(self.reader.decode()?)
    }

    /// Read an `OBJECT IDENTIFIER`.
    ///
    /// # Errors
    ///
    /// Fails on a wrong tag, a truncated input or an invalid encoding.
    pub fn read_oid(&mut self) -> Result<ObjectIdentifier, Pkcs7Error> {
        Ok(self.reader.decode()?)
    }

    /// Read an `OCTET STRING` and return its content.
    ///
    /// # Errors
    ///
    /// Fails on a wrong tag or a truncated input.
    pub fn read_octet_string(&mut self) -> Result<&'a [u8], Pkcs7Error> {
        let value: OctetStringRef<'a> = self.reader.decode()?;
        Ok(value.as_bytes())
    }

    /// Decode the next element with its [`Decode`] implementation.
    ///
    /// # Errors
    ///
    /// Fails if the element does not decode.
    pub fn decode<T: Decode<'a>>(&mut self) -> Result<T, Pkcs7Error> {
        Ok(self.reader.decode()?)
    }

    /// Skip the next element, whatever its tag.
    ///
    /// # Errors
    ///
    /// Fails if the element is truncated.
    pub fn skip(&mut self) -> Result<(), Pkcs7Error> {
        let _element = self.reader.tlv_bytes()?;
        Ok(())
    }

    /// Tag of the next element, if there is one.
    #[must_use]
    pub fn peek_tag(&self) -> Option<Tag> {
        self.reader.peek_tag().ok()
    }

    /// True if all the bytes have been read.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.reader.is_finished()
    }

    /// Check that all the bytes have been read.
    ///
    /// # Errors
    ///
    /// Fails if there are trailing bytes.
    pub fn finish(self) -> Result<(), Pkcs7Error> {
        Ok(self.reader.finish(())?)
    }

    fn read_header(&mut self, expected_tag: Tag) -> Result<Length, Pkcs7Error> {
        let header = Header::decode(&mut self.reader)?;
        let _tag = header.tag.assert_eq(expected_tag)?;
        if header.length > self.reader.remaining_len() {
            return Err(expected_tag.length_error().into());
        }

        Ok(header.length)
    }
}
