//! Fuzz target for the occurrence reader.
//!
//! The reader must never panic on malformed CSV/TSV, with either delimiter.

#![no_main]

use georef::input::OccurrenceReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let reader = OccurrenceReader::new();
    let _ = reader.read_bytes(data, b',');
    let _ = reader.read_bytes(data, b'\t');
});
