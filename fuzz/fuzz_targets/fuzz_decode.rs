#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = pkcs7_verify::wrap(data) {
        if let Ok(message) = pkcs7_verify::Pkcs7Message::from_der(&message) {
            let signed_data = &message.signed_data;
            for signer in &signed_data.signer_infos {
                let _ = signed_data.certificates.find_signer(signer);
                let _ = signer.signed_attributes_der();
            }
        }
    }
    let _ = pkcs7_verify::unwrap(data);
    if let Ok(list) = pkcs7_verify::export_signer_certificates(data) {
        let _ = pkcs7_verify::split_certificate_list(&list);
    }
    let _ = pkcs7_verify::split_certificate_list(data);
});
