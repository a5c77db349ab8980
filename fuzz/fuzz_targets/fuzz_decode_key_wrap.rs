#![no_main]

use gost_kex::core::ber::BerSequence;
use gost_kex::core::types::KeyWrap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic
    let _ = KeyWrap::from_ber(data);
});
