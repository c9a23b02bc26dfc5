//! Tests for the digest algorithms accepted for the signature.
use pkcs7_verify::{Pkcs7Error, Verifier, VerifyParams};

use crate::utils::check;

#[test]
fn test_pinned_digest() {
    let verifier = Verifier::default();

    // Declares SHA-256, but the signature is made over a SHA-512 digest.
    assert_eq!(
        check(&verifier, "mismatched_digest.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::SignatureMismatch)
    );
}

#[test]
fn test_digest_fallback() {
    let verifier = Verifier::new(VerifyParams::default().digest_fallback(true));

    assert_eq!(
        check(&verifier, "mismatched_digest.p7", "selfsigned.der", b"abc"),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "mismatched_digest.p7", "selfsigned.der", b"abd"),
        Err(Pkcs7Error::SignatureMismatch)
    );

    // Messages valid without fallback are still valid
    assert_eq!(
        check(&verifier, "selfsigned_abc.p7", "selfsigned.der", b"abc"),
        Ok(())
    );
    assert_eq!(
        check(
            &verifier,
            "chain_attrs.p7",
            "root.der",
            b"The quick brown fox jumps over the lazy dog\n"
        ),
        Ok(())
    );
}

#[test]
fn test_sha512() {
    assert_eq!(
        check(
            &Verifier::default(),
            "chain_sha512.p7",
            "root.der",
            b"The quick brown fox jumps over the lazy dog\n"
        ),
        Ok(())
    );
}

#[test]
#[cfg(feature = "sha1")]
fn test_sha1() {
    let verifier = Verifier::default();
    assert_eq!(
        check(&verifier, "selfsigned_sha1.p7", "selfsigned.der", b"abc"),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "selfsigned_sha1.p7", "selfsigned.der", b"abd"),
        Err(Pkcs7Error::SignatureMismatch)
    );
}

#[test]
#[cfg(not(feature = "sha1"))]
fn test_sha1_disabled() {
    let verifier = Verifier::default();
    assert_eq!(
        check(&verifier, "selfsigned_sha1.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::UnsupportedDigestAlgorithm(
            const_oid::db::rfc5912::ID_SHA_1
        ))
    );
}

#[test]
fn test_md5() {
    assert_eq!(
        check(&Verifier::default(), "md5.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::UnsupportedDigestAlgorithm(
            const_oid::db::rfc5912::ID_MD_5
        ))
    );
}
