//! Tests for the export of certificates and content.
use pkcs7_verify::{
    attached_content, export_certificates, export_signer_certificates, split_certificate_list,
    Pkcs7Error,
};

use crate::utils::asset;

#[test]
fn test_export_signer_certificates() {
    let leaf = asset("leaf.der");
    let inter = asset("intermediate.der");
    let selfsigned = asset("selfsigned.der");

    let list = export_signer_certificates(&asset("chain_attrs.p7")).unwrap();
    assert_eq!(list[0], 2);
    assert_eq!(
        split_certificate_list(&list).unwrap(),
        vec![&leaf[..], &inter[..]]
    );

    // Certificates of all signers, without duplicates
    let list = export_signer_certificates(&asset("multi_signer.p7")).unwrap();
    assert_eq!(
        split_certificate_list(&list).unwrap(),
        vec![&leaf[..], &inter[..], &selfsigned[..]]
    );

    let list = export_signer_certificates(&asset("selfsigned_abc_bare.p7")).unwrap();
    assert_eq!(split_certificate_list(&list).unwrap(), vec![&selfsigned[..]]);
}

#[test]
fn test_export_signer_certificates_cycle() {
    let list = export_signer_certificates(&asset("cycle.p7")).unwrap();
    assert_eq!(split_certificate_list(&list).unwrap().len(), 3);
}

#[test]
fn test_export_format() {
    let selfsigned = asset("selfsigned.der");
    let list = export_signer_certificates(&asset("selfsigned_abc.p7")).unwrap();

    let mut expected = vec![1];
    expected.extend(u32::try_from(selfsigned.len()).unwrap().to_le_bytes());
    expected.extend(&selfsigned);
    assert_eq!(list, expected);
}

#[test]
fn test_export_certificates() {
    let list = export_certificates(&asset("other_signer_key.p7")).unwrap();
    assert_eq!(
        split_certificate_list(&list).unwrap(),
        vec![&asset("selfsigned.der")[..], &asset("selfsigned2.der")[..]]
    );
}

#[test]
fn test_export_errors() {
    let message = asset("selfsigned_abc.p7");
    assert!(matches!(
        export_signer_certificates(&message[..100]),
        Err(Pkcs7Error::Parse(_))
    ));
    assert!(export_certificates(&message[..100]).is_err());
}

#[test]
fn test_attached_content() {
    assert_eq!(
        attached_content(&asset("attached.p7")).unwrap(),
        Some(b"abc".to_vec())
    );
    assert_eq!(attached_content(&asset("chain_attrs.p7")).unwrap(), None);
}
