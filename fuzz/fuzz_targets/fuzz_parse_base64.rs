#![no_main]

use gost_kex::core::family::AlgorithmFamily;
use gost_kex::core::types::KeyTransportMessage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Should never panic
    let _ = KeyTransportMessage::from_base64(data, AlgorithmFamily::Gost2001);
});
