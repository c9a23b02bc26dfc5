#![no_main]
use libfuzzer_sys::fuzz_target;

// Root of the messages in the corpus.
const ROOT: &[u8] = include_bytes!("../../pkcs7-verify/tests/assets/root.der");
const SELF_SIGNED: &[u8] = include_bytes!("../../pkcs7-verify/tests/assets/selfsigned.der");

fuzz_target!(|data: &[u8]| {
    let verifier = pkcs7_verify::Verifier::new(
        pkcs7_verify::VerifyParams::default().digest_fallback(true),
    );
    let _ = verifier.verify(data, ROOT, b"abc");
    let _ = verifier.verify(data, SELF_SIGNED, b"abc");
    let _ = pkcs7_verify::verify(data, data, data);
});
