//! SLDC decompression.
//!
//! This module decodes records in the ECMA-321 Streaming Lossless Data
//! Compression format, an LZ77-family bitstream used for inline compression
//! on tape drives and serial links.
//!
//! ## Control Words
//!
//! A 9-bit all-ones marker followed by a 4-bit code:
//!
//! | Code | Name | Action |
//! |------|------|--------|
//! | `0x0` | Flush | Skip to the next 4-byte boundary |
//! | `0x1` | Scheme 1 | Select Scheme 1 |
//! | `0x2` | Scheme 2 | Select Scheme 2 (not decoded) |
//! | `0x3` | File Mark | Rejected |
//! | `0x4` | EOR | Skip to the next 4-byte boundary, record complete |
//! | `0x5` | Reset 1 | Reset history, select Scheme 1 |
//! | `0x6` | Reset 2 | Reset history, select Scheme 2 |
//! | `0xF` | End Marker | No more records (when leading) |
//!
//! ## Scheme 1 Symbols
//!
//! | Bits | Meaning |
//! |------|---------|
//! | `0 bbbbbbbb` | Literal byte |
//! | `1 <count> dddddddddd` | Copy `count` (2-271) bytes from history offset `d` |
//!
//! ## Example
//!
//! ```rust
//! use sldc_stream::{Record, RecordDecoder};
//!
//! // 'A', 'B', EOR, padding
//! let data = [0x20, 0x90, 0xBF, 0xE8];
//! let mut decoder = RecordDecoder::new();
//! assert_eq!(decoder.decode(&data)?, Record::Data(b"AB".to_vec()));
//! # Ok::<(), sldc_stream::RecordError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Record bytes
//!       ↓
//! ┌─────────────┐
//! │ BitReader   │ ← MSB-first bit access, 4-byte alignment
//! └─────────────┘
//!       ↓
//! ┌─────────────┐
//! │ ControlWord │ ← 0x1FF marker + 4-bit code
//! └─────────────┘
//!       ↓
//! ┌─────────────┐
//! │ History     │ ← 1KB circular window for copy pointers
//! └─────────────┘
//!       ↓
//! Record data
//! ```

mod bit_reader;
mod control;
mod history;
mod record;


pub use bit_reader::{BitReader, CONTROL_MARKER, CONTROL_MARKER_BITS};
pub use control::{read_control, ControlWord, CONTROL_CODE_BITS};
pub use history::{HistoryBuffer, HISTORY_SIZE};
pub use record::{
    decompress, DecodeOptions, EndMarkerPolicy, Record, RecordDecoder, Scheme, MAX_MATCH_COUNT,
};

pub use crate::error::{DecompressError, RecordError, Result};
