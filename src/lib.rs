//! ECMA-321 Streaming Lossless Data Compression (SLDC) decoder.
//!
//! SLDC is the LZ77-family bitstream used for inline compression on tape
//! drives and serial storage links. This crate decodes complete records held
//! in memory.
//!
//! ## Features
//! - Core library depends only on the `log` facade
//! - `parallel` - Decode independent records on the rayon thread pool
//!
//! ## Example
//!
//! ```rust
//! use sldc_stream::{decompress, Record};
//!
//! // 'A', 'B', EOR, padding
//! let record = decompress(&[0x20, 0x90, 0xBF, 0xE8])?;
//! assert_eq!(record, Record::Data(b"AB".to_vec()));
//! # Ok::<(), sldc_stream::RecordError>(())
//! ```

pub mod decompress;
pub mod error;
mod stream;

#[cfg(feature = "parallel")]
mod parallel;

#[cfg(test)]
mod test_util;

pub use error::{DecompressError, RecordError};
pub use stream::{decompress_stream, RecordStream};

pub use decompress::{
    decompress, DecodeOptions, EndMarkerPolicy, Record, RecordDecoder, Scheme,
};

#[cfg(feature = "parallel")]
pub use parallel::decompress_parallel;
