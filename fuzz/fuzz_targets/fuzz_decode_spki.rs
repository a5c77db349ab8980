#![no_main]

use gost_kex::core::types::KeyExchangeParameters;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic
    let _ = KeyExchangeParameters::from_spki_der(data);
});
