//! Tests for the decoding of malformed and unsupported messages.
use pkcs7_verify::{verify, wrap, Pkcs7Error, Pkcs7Message, Verifier};

use crate::utils::{asset, check};

#[test]
fn test_truncations() {
    let message = asset("chain_attrs.p7");
    let root = asset("root.der");
    let payload = asset("payload.bin");

    for len in 0..message.len() {
        assert!(!verify(&message[..len], &root, &payload), "len {len}");
    }
    for len in 0..root.len() {
        assert!(!verify(&message, &root[..len], &payload), "len {len}");
    }
}

#[test]
fn test_byte_flips() {
    let mut message = asset("selfsigned_abc.p7");
    let root = asset("selfsigned.der");

    // Some bytes, such as algorithm parameters, are not covered by the signature,
    // so only check that this does not panic.
    for i in 0..message.len() {
        message[i] ^= 0x80;
        let _res = verify(&message, &root, b"abc");
        message[i] ^= 0x80;
    }
    assert!(verify(&message, &root, b"abc"));
}

#[test]
fn test_trailing_data() {
    let mut message = asset("selfsigned_abc.p7");
    let root = asset("selfsigned.der");

    message.extend(b"trailing data");
    assert!(verify(&message, &root, b"abc"));
}

#[test]
fn test_unsupported_content_type() {
    let mut message = asset("selfsigned_abc.p7");
    // Last byte of the OID: 1.2.840.113549.1.7.3, envelopedData
    assert_eq!(message[14], 0x02);
    message[14] = 0x03;

    assert_eq!(
        Pkcs7Message::from_der(&message).unwrap_err(),
        Pkcs7Error::UnsupportedContentType(const_oid::db::rfc5911::ID_ENVELOPED_DATA)
    );
    assert!(!verify(&message, &asset("selfsigned.der"), b"abc"));
}

#[test]
fn test_invalid_version() {
    assert!(matches!(
        check(&Verifier::default(), "version3.p7", "selfsigned.der", b"abc"),
        Err(Pkcs7Error::Parse(_))
    ));
}

#[test]
fn test_wrap() {
    let bare = asset("selfsigned_abc_bare.p7");
    let wrapped = asset("selfsigned_abc.p7");

    assert!(!pkcs7_verify::is_wrapped(&bare));
    assert_eq!(&*wrap(&bare).unwrap(), &wrapped[..]);
    assert_eq!(&*wrap(&wrapped).unwrap(), &wrapped[..]);
    assert_eq!(pkcs7_verify::unwrap(&wrapped).unwrap(), &bare[..]);
    assert_eq!(
        pkcs7_verify::unwrap(&wrap(&bare).unwrap()).unwrap(),
        &bare[..]
    );

    assert_eq!(
        wrap(&[0x30; 70_000]).unwrap_err(),
        Pkcs7Error::InputTooLarge
    );
}

#[test]
fn test_decoded_message() {
    let der = asset("chain_attrs.p7");
    let message = Pkcs7Message::from_der(&der).unwrap();
    let signed_data = &message.signed_data;

    assert_eq!(message.content_type, const_oid::db::rfc5911::ID_SIGNED_DATA);
    assert_eq!(signed_data.version, 1);
    assert_eq!(
        signed_data.digest_algorithm,
        pkcs7_verify::DigestAlgorithm::Sha256
    );
    assert_eq!(signed_data.content_type, const_oid::db::rfc5911::ID_DATA);
    assert_eq!(signed_data.content, None);
    assert_eq!(signed_data.certificates.len(), 2);

    let signer = &signed_data.signer_infos[0];
    let (index, cert) = signed_data.certificates.find_signer(signer).unwrap();
    assert_eq!(index, 1);
    assert_eq!(cert.raw, &asset("leaf.der")[..]);
    assert_eq!(signer.issuer, cert.issuer());
    assert_eq!(signer.serial_number, cert.serial_number());
    assert!(signer.auth_attributes.is_some());
}
