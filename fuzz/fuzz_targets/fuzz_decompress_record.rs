#![no_main]
use libfuzzer_sys::fuzz_target;
use sldc_stream::{DecodeOptions, EndMarkerPolicy, RecordDecoder};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the decoder options
    let options = DecodeOptions {
        end_marker: if data[0] & 1 == 0 {
            EndMarkerPolicy::Reject
        } else {
            EndMarkerPolicy::Ignore
        },
        strict_history: data[0] & 2 != 0,
    };

    let mut decoder = RecordDecoder::with_options(options);
    let _ = decoder.decode(&data[1..]);
});
