#![no_main]
use libfuzzer_sys::fuzz_target;
use sldc_stream::RecordStream;

fuzz_target!(|data: &[u8]| {
    // Every record is at least 4 bytes, so the stream cannot yield more
    let max_records = data.len() / 4 + 1;
    assert!(RecordStream::new(data).count() <= max_records);
});
