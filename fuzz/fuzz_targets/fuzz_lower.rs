#![no_main]
use libfuzzer_sys::fuzz_target;

use ddlift_codegen::{render_document, LoweringConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(grammar) = ddlift_grammar::parse(s, "fuzz.json") {
            let _ = render_document(&grammar.productions, &LoweringConfig::default());
        }
    }
});
