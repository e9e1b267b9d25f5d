//! Record streams - consecutive SLDC records in one buffer.
//!
//! Every record ends with EOR and padding to a 4-byte boundary, so the next
//! record starts on that boundary. One [`RecordDecoder`] is shared by all
//! records, so history carries over until a Reset control word.

use crate::decompress::{BitReader, DecodeOptions, Record, RecordDecoder, RecordError};

/// Iterator over the records of one stream.
///
/// Stops at a leading End Marker, at the exact end of the buffer, or after
/// yielding the first error.
#[derive(Debug, Clone)]
pub struct RecordStream<'a> {
    reader: BitReader<'a>,
    decoder: RecordDecoder,
    finished: bool,
    records: usize,
}

impl<'a> RecordStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            reader: BitReader::new(data),
            decoder: RecordDecoder::with_options(options),
            finished: false,
            records: 0,
        }
    }

    /// Number of records decoded so far.
    pub fn records_decoded(&self) -> usize {
        self.records
    }

    /// Byte offset of the next record.
    pub fn byte_position(&self) -> usize {
        self.reader.byte_position()
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<Vec<u8>, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.reader.is_eof() {
            log::debug!("stream exhausted after {} records", self.records);
            self.finished = true;
            return None;
        }

        match self.decoder.decode_from(&mut self.reader) {
            Ok(Record::Data(data)) => {
                self.records += 1;
                Some(Ok(data))
            }
            Ok(Record::EndOfStream) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode every record in `data`.
pub fn decompress_stream(data: &[u8]) -> Result<Vec<Vec<u8>>, RecordError> {
    RecordStream::new(data).collect()
}
