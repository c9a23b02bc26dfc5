//! **pkcs7-verify** decodes PKCS#7 `SignedData` messages ([RFC 2315]) and checks
//! that they authenticate a payload.
//!
//! A payload is considered authentic when:
//!
//! - the certificate of the signer is embedded in the message,
//! - this certificate chains up to a trusted root certificate provided by the caller,
//!   through the other certificates of the message,
//! - the signature of the signer covers the payload, directly or through the
//!   `messageDigest` authenticated attribute.
//!
//! Messages are decoded from untrusted inputs: any malformed input is rejected
//! without reading past the end of the buffers.
//!
//! ```
//! let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/assets");
//! let message = std::fs::read(format!("{dir}/selfsigned_abc.p7"))?;
//! let root = std::fs::read(format!("{dir}/selfsigned.der"))?;
//!
//! assert!(pkcs7_verify::verify(&message, &root, b"abc"));
//! assert!(!pkcs7_verify::verify(&message, &root, b"abd"));
//!
//! // The reason of a rejection can be retrieved with a verifier.
//! let verifier = pkcs7_verify::Verifier::default();
//! assert_eq!(
//!     verifier.check(&message, &root, b"abd"),
//!     Err(pkcs7_verify::Pkcs7Error::SignatureMismatch)
//! );
//!
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! [RFC 2315]: https://datatracker.ietf.org/doc/html/rfc2315

mod chain;
pub mod content_info;
pub use content_info::{is_wrapped, unwrap, wrap, Pkcs7Message};
pub mod cursor;
pub mod digest;
pub use digest::DigestAlgorithm;
mod error;
pub use error::Pkcs7Error;
pub mod export;
pub use export::{
    attached_content, export_certificates, export_signer_certificates, split_certificate_list,
};
mod params;
pub use params::VerifyParams;
mod signature;
pub mod signed_data;
pub mod signer_info;
pub mod store;
mod verify;
pub use verify::{verify, Verifier};
pub mod x509;
