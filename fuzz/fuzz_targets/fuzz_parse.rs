#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Loading must never panic on any input.
        let _ = ddlift_grammar::parse(s, "fuzz.json");
    }
});
