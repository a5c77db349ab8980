#![no_main]

use gost_kex::core::family::AlgorithmFamily;
use gost_kex::core::types::KeyTransportMessage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try decoding for each family - should never panic
    for family in AlgorithmFamily::ALL {
        if let Ok(message) = KeyTransportMessage::decode_for_family(data, family) {
            let _ = message.ephemeral_key_for(family);
        }
    }
});
