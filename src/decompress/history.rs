//! SLDC history buffer.
//!
//! A fixed 1024-byte circular window. Copy pointers address it by absolute
//! offset, not by distance back from the write position.

use super::{DecompressError, Result};

/// History buffer capacity in bytes.
pub const HISTORY_SIZE: usize = 1024;

/// Circular history window.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    /// Window storage
    data: Box<[u8; HISTORY_SIZE]>,
    /// Next write slot
    pos: usize,
    /// Slots written since construction or the last reset, capped at capacity
    filled: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; HISTORY_SIZE]),
            pos: 0,
            filled: 0,
        }
    }

    /// Rewind the write position to the start of the window.
    /// Note: window contents are NOT cleared, stale bytes stay readable.
    #[inline]
    pub fn reset(&mut self) {
        self.pos = 0;
        self.filled = 0;
    }

    /// Append a byte, wrapping at the end of the window.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.data[self.pos] = byte;
        self.pos = (self.pos + 1) % HISTORY_SIZE;
        if self.filled < HISTORY_SIZE {
            self.filled += 1;
        }
    }

    /// Read the byte at `offset` and return it with the following offset.
    #[inline]
    pub fn get(&self, offset: usize) -> Result<(u8, usize)> {
        if offset >= HISTORY_SIZE {
            return Err(DecompressError::InvalidDisplacement {
                offset,
                filled: self.filled,
            });
        }
        Ok((self.data[offset], (offset + 1) % HISTORY_SIZE))
    }

    /// Whether `offset` has been written since construction or the last reset.
    ///
    /// Writes after a reset always start at slot 0, so the populated slots
    /// are exactly `0..filled`.
    #[inline]
    pub fn is_populated(&self, offset: usize) -> bool {
        offset < self.filled
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of populated slots.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn capacity(&self) -> usize {
        HISTORY_SIZE
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
