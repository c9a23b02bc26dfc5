//! Integration tests for pkcs7-verify.

// Dependencies of the library, not used directly by the tests.
use der as _;
use log as _;
use p256 as _;
use p384 as _;
use rsa as _;
#[cfg(feature = "sha1")]
use sha1 as _;
use sha2 as _;
use spki as _;

// Verification of valid and tampered messages
mod verify;

// Trust chains, revocation and verification parameters
mod chain;
mod digest;

// Decoding of malformed or unsupported messages
mod decode;

// Export of certificates and content
mod export;
