//! Export of the certificates and content of a message.
//!
//! Certificates are exported as a list of DER blobs, in the following format:
//!
//! - the number of certificates, on one byte,
//! - for each certificate, its length as a little-endian `u32`, followed by its
//!   DER encoding.
use der::{Length, Reader, SliceReader};

use crate::content_info::{self, Pkcs7Message};
use crate::error::Pkcs7Error;
use crate::store::CertificateStore;

/// Export the certificates of the signers of a message.
///
/// For each signer, its certificate is exported, followed by the certificates of
/// the message issuing it, up to a self-issued certificate. Certificates are
/// exported only once, even if shared by several signers. Signers whose
/// certificate is not in the message are ignored.
///
/// # Errors
///
/// Fails if the message cannot be decoded, if no signer has a certificate, or
/// with [`Pkcs7Error::InputTooLarge`] if the certificates do not fit in the
/// export format.
pub fn export_signer_certificates(message: &[u8]) -> Result<Vec<u8>, Pkcs7Error> {
    let message = content_info::wrap(message)?;
    let message = Pkcs7Message::from_der(&message)?;
    let signed_data = &message.signed_data;
    let store = &signed_data.certificates;

    let mut indexes = Vec::new();
    for (signer_index, signer) in signed_data.signer_infos.iter().enumerate() {
        let Some((index, _)) = store.find_signer(signer) else {
            log::debug!("no certificate for signer {signer_index}");
            continue;
        };

        for index in store.chain(index) {
            if !indexes.contains(&index) {
                indexes.push(index);
            }
        }
    }
    if indexes.is_empty() {
        return Err(Pkcs7Error::SignerNotFound);
    }

    encode_certificate_list(store, &indexes)
}

/// Export all the certificates of a message, in order.
///
/// # Errors
///
/// Fails if the message cannot be decoded, or with
/// [`Pkcs7Error::InputTooLarge`] if the certificates do not fit in the export
/// format.
pub fn export_certificates(message: &[u8]) -> Result<Vec<u8>, Pkcs7Error> {
    let message = content_info::wrap(message)?;
    let message = Pkcs7Message::from_der(&message)?;
    let store = &message.signed_data.certificates;

    let indexes: Vec<usize> = (0..store.len()).collect();
    encode_certificate_list(store, &indexes)
}

/// Split a list of certificates built by [`export_signer_certificates`] or
/// [`export_certificates`].
///
/// The certificates are not decoded.
///
/// # Errors
///
/// Fails if the list is truncated or followed by trailing bytes.
pub fn split_certificate_list(list: &[u8]) -> Result<Vec<&[u8]>, Pkcs7Error> {
    let mut reader = SliceReader::new(list)?;

    let count = reader.read_byte()?;
    let mut certs = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let mut len = [0; 4];
        let _len = reader.read_into(&mut len)?;
        let len = Length::try_from(u32::from_le_bytes(len))?;
        certs.push(reader.read_slice(len)?);
    }

    Ok(reader.finish(certs)?)
}

/// Content attached to a message, if any.
///
/// For a `data` content, this is the content of the `OCTET STRING`.
///
/// # Errors
///
/// Fails if the message cannot be decoded.
pub fn attached_content(message: &[u8]) -> Result<Option<Vec<u8>>, Pkcs7Error> {
    let message = content_info::wrap(message)?;
    let message = Pkcs7Message::from_der(&message)?;

    Ok(message.signed_data.content.map(<[u8]>::to_vec))
}

fn encode_certificate_list(
    store: &CertificateStore,
    indexes: &[usize],
) -> Result<Vec<u8>, Pkcs7Error> {
    let count = u8::try_from(indexes.len()).map_err(|_| Pkcs7Error::InputTooLarge)?;

    let mut res = vec![count];
    for cert in indexes.iter().filter_map(|index| store.get(*index)) {
        let len = u32::try_from(cert.raw.len()).map_err(|_| Pkcs7Error::InputTooLarge)?;
        res.extend(len.to_le_bytes());
        res.extend(cert.raw);
    }

    Ok(res)
}
