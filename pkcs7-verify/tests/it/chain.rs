//! Tests for the validation of the chain of the signer.
use pkcs7_verify::{Pkcs7Error, Verifier, VerifyParams};

use crate::utils::check;

#[test]
fn test_max_chain_depth() {
    let payload = b"The quick brown fox jumps over the lazy dog\n";

    let verifier = Verifier::new(VerifyParams::default().max_chain_depth(1));
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", payload),
        Ok(())
    );

    let verifier = Verifier::new(VerifyParams::default().max_chain_depth(0));
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", payload),
        Err(Pkcs7Error::ChainUntrusted)
    );
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "intermediate.der", payload),
        Ok(())
    );
    assert_eq!(check(&verifier, "direct.p7", "root.der", b"abc"), Ok(()));
}

#[test]
fn test_revoked() {
    let verifier = Verifier::default();

    assert_eq!(check(&verifier, "direct.p7", "root.der", b"abc"), Ok(()));
    assert_eq!(
        check(&verifier, "direct_revoked.p7", "root.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
    // Revocation lists only apply to certificates issued by the root
    assert_eq!(
        check(&verifier, "direct_revoked.p7", "direct.der", b"abc"),
        Ok(())
    );
}

#[test]
fn test_cycle() {
    let verifier = Verifier::new(VerifyParams::default().max_chain_depth(usize::MAX));
    assert_eq!(
        check(&verifier, "cycle.p7", "root.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
    assert_eq!(
        check(&verifier, "cycle.p7", "other_root.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
}

#[test]
fn test_min_rsa_key_bits() {
    let payload = b"The quick brown fox jumps over the lazy dog\n";

    let verifier = Verifier::new(VerifyParams::default().min_rsa_key_bits(2048));
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", payload),
        Ok(())
    );

    let verifier = Verifier::new(VerifyParams::default().min_rsa_key_bits(4096));
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", payload),
        Err(Pkcs7Error::ChainUntrusted)
    );
    // The signer key is also checked
    assert_eq!(
        check(&verifier, "selfsigned_abc.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::SignatureMismatch)
    );
}

#[test]
fn test_intermediate_not_ca() {
    let verifier = Verifier::default();

    assert_eq!(
        check(&verifier, "non_ca_issuer.p7", "branch_root.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
    // Same name and key, with the cA flag set
    assert_eq!(
        check(&verifier, "ca_issuer.p7", "branch_root.der", b"abc"),
        Ok(())
    );
}

#[test]
fn test_backtrack_on_depth_limit() {
    let verifier = Verifier::new(VerifyParams::default().max_chain_depth(2));
    assert_eq!(
        check(&verifier, "backtrack.p7", "branch_root.der", b"abc"),
        Ok(())
    );

    let verifier = Verifier::new(VerifyParams::default().max_chain_depth(1));
    assert_eq!(
        check(&verifier, "backtrack.p7", "branch_root.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
}
