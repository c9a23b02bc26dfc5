//! Tests for the verification of messages.
use pkcs7_verify::{verify, Pkcs7Error, Verifier, VerifyParams};

use crate::utils::{asset, check};

#[test]
fn test_self_signed() {
    let message = asset("selfsigned_abc.p7");
    let root = asset("selfsigned.der");

    assert!(verify(&message, &root, b"abc"));
    assert!(!verify(&message, &root, b"abd"));
    assert!(!verify(&message, &root, b""));
    assert!(!verify(&message, &root, b"abcd"));
    assert!(!verify(&message, &asset("other_root.der"), b"abc"));
    assert!(!verify(&message, &asset("root.der"), b"abc"));
}

#[test]
fn test_bare_signed_data() {
    let message = asset("selfsigned_abc_bare.p7");
    let root = asset("selfsigned.der");

    assert!(verify(&message, &root, b"abc"));
    assert!(!verify(&message, &root, b"abd"));
}

#[test]
fn test_payload_bit_flips() {
    let message = asset("chain_attrs.p7");
    let root = asset("root.der");
    let mut payload = asset("payload.bin");
    assert!(verify(&message, &root, &payload));

    for i in 0..payload.len() {
        payload[i] ^= 0x01;
        assert!(!verify(&message, &root, &payload), "flip at {i}");
        payload[i] ^= 0x01;
    }
    assert!(verify(&message, &root, &payload));
}

#[test]
fn test_chain_with_attributes() {
    let verifier = Verifier::default();
    let payload = asset("payload.bin");

    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", &payload),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "root.der", b"abc"),
        Err(Pkcs7Error::SignatureMismatch)
    );
    assert_eq!(
        check(&verifier, "chain_attrs.p7", "other_root.der", &payload),
        Err(Pkcs7Error::ChainUntrusted)
    );
}

#[test]
fn test_chain_without_attributes() {
    let verifier = Verifier::default();
    let payload = asset("payload.bin");

    // The leaf is before the intermediate in this message
    assert_eq!(
        check(&verifier, "chain_sha512.p7", "root.der", &payload),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "chain_sha512.p7", "intermediate.der", &payload),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "chain_sha512.p7", "leaf.der", &payload),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "chain_sha512.p7", "selfsigned.der", &payload),
        Err(Pkcs7Error::ChainUntrusted)
    );
}

#[test]
fn test_ecdsa() {
    let verifier = Verifier::default();
    let payload = asset("payload.bin");

    assert_eq!(
        check(&verifier, "ecdsa_attrs.p7", "root.der", &payload),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "ecdsa_attrs.p7", "root.der", b"abc"),
        Err(Pkcs7Error::SignatureMismatch)
    );
    assert_eq!(
        check(&verifier, "ecdsa_attrs.p7", "ecdsa_leaf.der", &payload),
        Ok(())
    );
}

#[test]
fn test_signature_with_other_certificate() {
    // The signer info references the first certificate, but the signature is
    // made with the key of the second one.
    let payload = b"abc";

    let verifier = Verifier::default();
    assert_eq!(
        check(&verifier, "other_signer_key.p7", "selfsigned.der", payload),
        Ok(())
    );
    // The matched certificate must still be trusted
    assert_eq!(
        check(&verifier, "other_signer_key.p7", "selfsigned2.der", payload),
        Err(Pkcs7Error::ChainUntrusted)
    );

    let verifier = Verifier::new(VerifyParams::default().verify_all_certificates(false));
    assert_eq!(
        check(&verifier, "other_signer_key.p7", "selfsigned.der", payload),
        Err(Pkcs7Error::SignatureMismatch)
    );
    assert_eq!(
        check(&verifier, "selfsigned_abc.p7", "selfsigned.der", payload),
        Ok(())
    );
}

#[test]
fn test_multiple_signers() {
    // Only the first signer is verified
    let verifier = Verifier::default();
    assert_eq!(
        check(&verifier, "multi_signer.p7", "root.der", b"abc"),
        Ok(())
    );
    assert_eq!(
        check(&verifier, "multi_signer.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::ChainUntrusted)
    );
}

#[test]
fn test_unsupported_second_signer() {
    let verifier = Verifier::default();
    let root = asset("root.der");

    // Use sha224 in the digest algorithm of the second signer
    let mut message = asset("multi_signer.p7");
    assert_eq!(message[2809], 0x01);
    message[2809] = 0x04;
    assert_eq!(verifier.check(&message, &root, b"abc"), Ok(()));
    assert!(!verify(&message, &root, b"abd"));

    // Garbage in the version of the second signer
    let mut message = asset("multi_signer.p7");
    assert_eq!(message[2728..2731], [0x02, 0x01, 0x01]);
    message[2728] = 0x04;
    assert_eq!(verifier.check(&message, &root, b"abc"), Ok(()));
}

#[test]
fn test_attached_content_is_not_the_payload() {
    let message = asset("attached.p7");
    let root = asset("selfsigned.der");

    assert!(verify(&message, &root, b"abc"));
    assert!(!verify(&message, &root, b""));
}

#[test]
fn test_message_untouched() {
    let message = asset("chain_attrs.p7");
    let copy = message.clone();
    let root = asset("root.der");

    assert!(verify(&message, &root, &asset("payload.bin")));
    assert_eq!(message, copy);
}
