#![no_main]

use gost_kex::core::ber::BerSequence;
use gost_kex::core::types::EncryptedKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // BER input may use long-form lengths, so compare values rather than bytes
    if let Ok(key) = EncryptedKey::from_ber(data) {
        let encoded = key.to_ber().expect("decoded key must re-encode");
        assert_eq!(EncryptedKey::from_ber(&encoded).ok(), Some(key));
    }
});
