//! Parallel decoding of independent records.

use rayon::prelude::*;

use crate::decompress::{Record, RecordDecoder, RecordError};

/// Decode independent records on the rayon thread pool.
///
/// Each record gets its own fresh decoder, so no history is shared between
/// them. Results are returned in input order.
pub fn decompress_parallel(records: &[&[u8]]) -> Vec<Result<Record, RecordError>> {
    records
        .par_iter()
        .map(|data| RecordDecoder::new().decode(data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::decompress::ControlWord;
    use crate::test_util::SldcWriter;

    #[test]
    fn test_parallel_preserves_order() {
        let a = SldcWriter::new().literal(b'A').eor().finish();
        let b = SldcWriter::new().literals(b"BC").copy(2, 0).eor().finish();
        let end = SldcWriter::new().control(ControlWord::EndMarker).finish();

        let results = decompress_parallel(&[a.as_slice(), b.as_slice(), end.as_slice(), &[]]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0], Ok(Record::Data(b"A".to_vec())));
        assert_eq!(results[1], Ok(Record::Data(b"BCBC".to_vec())));
        assert_eq!(results[2], Ok(Record::EndOfStream));
        assert!(results[3].is_err());
    }
}
