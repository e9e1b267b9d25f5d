//! SLDC record decoding.
//!
//! Implements the control word handling and Scheme 1 data symbols of
//! ECMA-321. Scheme 2 is recognised but not decoded.

use super::{
    bit_reader::BitReader,
    control::{read_control, ControlWord},
    history::HistoryBuffer,
    DecompressError, RecordError, Result,
};
use std::fmt;

/// Largest match count a copy pointer may encode.
pub const MAX_MATCH_COUNT: u32 = 271;

/// Width of a copy pointer's history offset.
const DISPLACEMENT_BITS: u32 = 10;

/// Longest unary prefix of a copy pointer's match count field.
const MAX_MATCH_ONES: usize = 4;

/// Match count base, indexed by the number of leading 1 bits.
const MATCH_BASE: [u32; 5] = [2, 4, 8, 16, 32];

/// Extra bits following the prefix, indexed by the number of leading 1 bits.
const MATCH_EXTRA: [u32; 5] = [1, 2, 3, 4, 8];

/// Fewest bits any control word or data symbol occupies.
const MIN_SYMBOL_BITS: usize = 9;

/// Symbol decoding ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Literals and history copies
    Scheme1,
    /// Uncompressed byte transfer, not implemented
    Scheme2,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheme1 => write!(f, "Scheme 1"),
            Self::Scheme2 => write!(f, "Scheme 2"),
        }
    }
}

/// What to do with an End Marker once the record has produced output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndMarkerPolicy {
    /// Fail with [`DecompressError::UnexpectedEndMarker`].
    #[default]
    Reject,
    /// Skip it and keep decoding.
    Ignore,
}

/// Decoder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Handling of an End Marker inside a non-empty record.
    pub end_marker: EndMarkerPolicy,
    /// Reject copies that read history slots not written since the last
    /// reset, instead of returning whatever stale byte is there.
    pub strict_history: bool,
}

/// Outcome of decoding one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A complete record, terminated by EOR.
    Data(Vec<u8>),
    /// A leading End Marker: there are no more records.
    EndOfStream,
}

impl Record {
    /// The record bytes, or `None` at end of stream.
    pub fn into_data(self) -> Option<Vec<u8>> {
        match self {
            Self::Data(data) => Some(data),
            Self::EndOfStream => None,
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// Per-record state. Created at the start of every record.
struct RecordState {
    scheme: Scheme,
    output: Vec<u8>,
}

impl RecordState {
    fn new() -> Self {
        Self {
            scheme: Scheme::Scheme1,
            output: Vec::new(),
        }
    }
}

/// Result of one decode step.
enum Step {
    Continue,
    Done,
    EndOfStream,
}

/// SLDC record decoder.
///
/// Owns the history buffer. Reusing one decoder for consecutive records of
/// the same stream keeps the history between them; create a fresh decoder
/// (or call [`reset`](Self::reset)) for unrelated records.
#[derive(Debug, Clone, Default)]
pub struct RecordDecoder {
    history: HistoryBuffer,
    options: DecodeOptions,
}

impl RecordDecoder {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            history: HistoryBuffer::new(),
            options,
        }
    }

    /// Reset decoder state for reuse.
    pub fn reset(&mut self) {
        self.history.reset();
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Decode the record at the start of `data`.
    pub fn decode(&mut self, data: &[u8]) -> std::result::Result<Record, RecordError> {
        let mut reader = BitReader::new(data);
        self.decode_from(&mut reader)
    }

    /// Decode one record starting at the reader's position.
    ///
    /// On success after EOR the reader sits on the 4-byte boundary that
    /// follows the record.
    pub fn decode_from(
        &mut self,
        reader: &mut BitReader<'_>,
    ) -> std::result::Result<Record, RecordError> {
        let start = reader.bit_position();
        let mut state = RecordState::new();

        loop {
            match self.step(reader, &mut state) {
                Ok(Step::Continue) => {}
                Ok(Step::Done) => {
                    log::debug!(
                        "record complete: {} bytes from {} input bits",
                        state.output.len(),
                        reader.bit_position() - start
                    );
                    return Ok(Record::Data(state.output));
                }
                Ok(Step::EndOfStream) => {
                    log::debug!("end of stream at bit {}", reader.bit_position());
                    return Ok(Record::EndOfStream);
                }
                Err(error) => {
                    log::warn!(
                        "record decode failed at bit {}: {}",
                        reader.bit_position(),
                        error
                    );
                    return Err(RecordError::new(error, state.output));
                }
            }
        }
    }

    /// Handle one control word or one data symbol.
    fn step(&mut self, reader: &mut BitReader<'_>, state: &mut RecordState) -> Result<Step> {
        if reader.avail() < MIN_SYMBOL_BITS {
            return Err(DecompressError::TruncatedInput);
        }

        if reader.is_control() {
            let ctrl = read_control(reader)?;
            log::trace!("control word {} at bit {}", ctrl, reader.bit_position());
            return self.apply_control(ctrl, reader, state);
        }

        match state.scheme {
            Scheme::Scheme1 => {
                self.decode_scheme1_symbol(reader, &mut state.output)?;
                Ok(Step::Continue)
            }
            Scheme::Scheme2 => Err(DecompressError::UnsupportedScheme(Scheme::Scheme2)),
        }
    }

    fn apply_control(
        &mut self,
        ctrl: ControlWord,
        reader: &mut BitReader<'_>,
        state: &mut RecordState,
    ) -> Result<Step> {
        match ctrl {
            ControlWord::Flush => {
                reader.align()?;
                Ok(Step::Continue)
            }
            ControlWord::Scheme1 => {
                state.scheme = Scheme::Scheme1;
                Ok(Step::Continue)
            }
            ControlWord::Scheme2 => {
                state.scheme = Scheme::Scheme2;
                Ok(Step::Continue)
            }
            ControlWord::Eor => {
                reader.align()?;
                Ok(Step::Done)
            }
            ControlWord::Reset1 | ControlWord::Reset2 => {
                state.scheme = if ctrl == ControlWord::Reset1 {
                    Scheme::Scheme1
                } else {
                    Scheme::Scheme2
                };
                log::debug!("history reset, now {}", state.scheme);
                self.history.reset();
                Ok(Step::Continue)
            }
            ControlWord::EndMarker => {
                if state.output.is_empty() {
                    return Ok(Step::EndOfStream);
                }
                match self.options.end_marker {
                    EndMarkerPolicy::Reject => Err(DecompressError::UnexpectedEndMarker),
                    EndMarkerPolicy::Ignore => Ok(Step::Continue),
                }
            }
            ControlWord::FileMark => Err(DecompressError::InvalidControlSymbol(ctrl.code())),
        }
    }

    /// Decode a literal or a copy pointer.
    fn decode_scheme1_symbol(
        &mut self,
        reader: &mut BitReader<'_>,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        if !reader.read_bit()? {
            let byte = reader.read_byte()?;
            self.history.add(byte);
            output.push(byte);
            return Ok(());
        }

        let match_count = read_match_count(reader)?;
        let mut displacement = reader.get(DISPLACEMENT_BITS)? as usize;

        for _ in 0..match_count {
            if self.options.strict_history && !self.history.is_populated(displacement) {
                return Err(DecompressError::InvalidDisplacement {
                    offset: displacement,
                    filled: self.history.filled(),
                });
            }
            let (byte, next) = self.history.get(displacement)?;
            displacement = next;
            self.history.add(byte);
            output.push(byte);
        }

        Ok(())
    }
}

/// Read the match count field of a copy pointer (after its leading 1 bit).
///
/// ```text
/// 0 x          2..=3
/// 10 xx        4..=7
/// 110 xxx      8..=15
/// 1110 xxxx    16..=31
/// 1111 xxxxxxxx 32..=271
/// ```
fn read_match_count(reader: &mut BitReader<'_>) -> Result<u32> {
    let mut ones = 0;
    while ones < MAX_MATCH_ONES && reader.read_bit()? {
        ones += 1;
    }

    let extra = reader.get(MATCH_EXTRA[ones])?;
    let match_count = MATCH_BASE[ones] + extra;
    if match_count > MAX_MATCH_COUNT {
        return Err(DecompressError::InvalidMatchCount(match_count));
    }
    Ok(match_count)
}

/// Decode a single record with a fresh decoder.
pub fn decompress(data: &[u8]) -> std::result::Result<Record, RecordError> {
    RecordDecoder::new().decode(data)
}
