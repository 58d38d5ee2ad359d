#![no_main]
use libfuzzer_sys::fuzz_target;

use radar_core::framer::LineFramer;
use radar_core::ingest::parse_line;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the framer and the line parser must never
    // panic; malformed input is rejected, never trusted.
    let mut framer = LineFramer::new();
    for chunk in data.chunks(7) {
        framer.feed(chunk);
        while let Some(line) = framer.next_line() {
            let _ = parse_line(&line);
        }
    }
});
