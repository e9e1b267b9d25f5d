//! Bit reader for SLDC records.
//!
//! Reads bits from a byte stream, MSB first (ECMA-321 convention).

use super::{DecompressError, Result};

/// The 9-bit all-ones pattern that introduces every control word.
pub const CONTROL_MARKER: u32 = 0x1FF;

/// Width of the control word marker in bits.
pub const CONTROL_MARKER_BITS: u32 = 9;

/// Flush and EOR pad the stream to this many bits.
const ALIGN_BITS: usize = 32;

/// Bit reader that reads from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Offset of the byte holding the next unread bit
    pos: usize,
    /// Unread bits left in `data[pos]`, in 1..=8
    bits: u32,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bits: 8,
        }
    }

    /// Read `n` bits (1..=32) and advance the position.
    ///
    /// The value is returned right-justified. On failure the cursor is left
    /// where it was.
    pub fn get(&mut self, n: u32) -> Result<u32> {
        debug_assert!((1..=32).contains(&n));

        if n as usize > self.avail() {
            return Err(DecompressError::TruncatedInput);
        }

        let mut value = 0u32;
        let mut remaining = n;
        while remaining > 0 {
            let take = remaining.min(self.bits);
            let shift = self.bits - take;
            let chunk = (u32::from(self.data[self.pos]) >> shift) & ((1 << take) - 1);
            value = (value << take) | chunk;

            self.bits -= take;
            remaining -= take;
            if self.bits == 0 {
                self.pos += 1;
                self.bits = 8;
            }
        }

        Ok(value)
    }

    /// Peek at the next `n` bits without consuming them.
    pub fn peek(&mut self, n: u32) -> Result<u32> {
        let (pos, bits) = (self.pos, self.bits);
        let value = self.get(n);
        self.pos = pos;
        self.bits = bits;
        value
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.get(1)? != 0)
    }

    /// Read a single byte (8 bits).
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.get(8)? as u8)
    }

    /// Check whether a control word marker starts at the cursor.
    pub fn is_control(&mut self) -> bool {
        matches!(self.peek(CONTROL_MARKER_BITS), Ok(CONTROL_MARKER))
    }

    /// Skip forward to the next 4-byte boundary.
    ///
    /// Already aligned positions consume nothing. If the buffer ends before
    /// the boundary the cursor is not moved.
    pub fn align(&mut self) -> Result<()> {
        let bit_pos = self.bit_position();
        let target = bit_pos.next_multiple_of(ALIGN_BITS);
        if target == bit_pos {
            return Ok(());
        }
        if target > self.data.len() * 8 {
            return Err(DecompressError::TruncatedInput);
        }

        self.pos = target / 8;
        self.bits = 8;
        Ok(())
    }

    /// Remaining bits available.
    pub fn avail(&self) -> usize {
        (self.data.len() - self.pos) * 8 - (8 - self.bits as usize)
    }

    /// Get the current bit position from the start of the buffer.
    pub fn bit_position(&self) -> usize {
        self.pos * 8 + (8 - self.bits as usize)
    }

    /// Get the current byte position (bytes fully or partly consumed).
    pub fn byte_position(&self) -> usize {
        self.pos
    }

    /// Check if at end of data.
    pub fn is_eof(&self) -> bool {
        self.avail() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        let data = [0b10110100, 0b11001010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.get(4).unwrap(), 0b1011);
        assert_eq!(reader.get(4).unwrap(), 0b0100);
        assert_eq!(reader.get(8).unwrap(), 0b11001010);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_read_across_bytes() {
        let data = [0b1010_1010, 0b1100_1100, 0b1111_0000];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.get(3).unwrap(), 0b101);
        assert_eq!(reader.get(10).unwrap(), 0b01010_11001);
        assert_eq!(reader.avail(), 11);
        assert_eq!(reader.get(11).unwrap(), 0b100_1111_0000);
    }

    #[test]
    fn test_read_full_word() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 0x80];
        let mut reader = BitReader::new(&data);

        assert!(reader.read_bit().unwrap());
        reader.align().unwrap();
        assert_eq!(reader.bit_position(), 32);

        let mut reader = BitReader::new(&data);
        assert_eq!(reader.get(32).unwrap(), 0xDEADBEEF);
        assert_eq!(reader.get(1).unwrap(), 1);
    }

    #[test]
    fn test_peek_bits() {
        let data = [0b10110100];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.peek(4).unwrap(), 0b1011);
        assert_eq!(reader.peek(8).unwrap(), 0b10110100);
        assert_eq!(reader.avail(), 8);
        assert_eq!(reader.read_byte().unwrap(), 0b10110100);
    }

    #[test]
    fn test_truncated_read_keeps_cursor() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);

        reader.get(5).unwrap();
        assert_eq!(reader.get(4), Err(DecompressError::TruncatedInput));
        assert_eq!(reader.peek(4), Err(DecompressError::TruncatedInput));
        assert_eq!(reader.avail(), 3);
        assert_eq!(reader.get(3).unwrap(), 0b111);
        assert_eq!(reader.get(1), Err(DecompressError::TruncatedInput));
    }

    #[test]
    fn test_is_control() {
        // 1111_1111 1xxx_xxxx
        let mut reader = BitReader::new(&[0xFF, 0x80]);
        assert!(reader.is_control());
        assert_eq!(reader.bit_position(), 0);

        let mut reader = BitReader::new(&[0xFF, 0x7F]);
        assert!(!reader.is_control());

        // Too short to hold a marker
        let mut reader = BitReader::new(&[0xFF]);
        assert!(!reader.is_control());
    }

    #[test]
    fn test_align() {
        let data = [0u8; 8];
        let mut reader = BitReader::new(&data);

        // Aligned at start: nothing consumed
        reader.align().unwrap();
        assert_eq!(reader.bit_position(), 0);

        reader.get(13).unwrap();
        reader.align().unwrap();
        assert_eq!(reader.bit_position(), 32);
        assert_eq!(reader.byte_position(), 4);

        reader.align().unwrap();
        assert_eq!(reader.bit_position(), 32);

        reader.get(1).unwrap();
        reader.align().unwrap();
        assert!(reader.is_eof());
    }

    #[test]
    fn test_align_truncated() {
        let data = [0u8; 6];
        let mut reader = BitReader::new(&data);

        reader.get(9).unwrap();
        reader.align().unwrap();
        reader.get(1).unwrap();
        assert_eq!(reader.align(), Err(DecompressError::TruncatedInput));
        assert_eq!(reader.bit_position(), 33);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(&[]);
        assert!(reader.is_eof());
        assert_eq!(reader.avail(), 0);
        assert!(!reader.is_control());
        assert_eq!(reader.get(1), Err(DecompressError::TruncatedInput));
        assert!(reader.align().is_ok());
    }
}
