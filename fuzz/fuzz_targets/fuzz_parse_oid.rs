#![no_main]

use gost_kex::core::oid::OidValue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsed OIDs must print back in canonical form
    if let Ok(oid) = data.parse::<OidValue>() {
        assert_eq!(oid.to_string().parse::<OidValue>().ok(), Some(oid));
    }
});
