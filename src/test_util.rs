//! Test-only SLDC bitstream builder.

use crate::decompress::{ControlWord, CONTROL_MARKER};

/// MSB-first bit writer that knows the Scheme 1 symbol layout.
#[derive(Debug, Default)]
pub struct SldcWriter {
    bytes: Vec<u8>,
    /// Bits used in the last byte, 0 when byte aligned
    used: u32,
}

impl SldcWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `n` bits of `value`, MSB first.
    pub fn bits(mut self, value: u32, n: u32) -> Self {
        for i in (0..n).rev() {
            if self.used == 0 {
                self.bytes.push(0);
            }
            let bit = ((value >> i) & 1) as u8;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= bit << (7 - self.used);
            self.used = (self.used + 1) % 8;
        }
        self
    }

    pub fn literal(self, byte: u8) -> Self {
        self.bits(0, 1).bits(u32::from(byte), 8)
    }

    pub fn literals(self, bytes: &[u8]) -> Self {
        bytes.iter().fold(self, |w, &b| w.literal(b))
    }

    /// Copy pointer for `count` bytes (2..=287 encodable) from `displacement`.
    pub fn copy(self, count: u32, displacement: u32) -> Self {
        let (prefix, prefix_len, base, extra_bits) = match count {
            2..=3 => (0b0, 1, 2, 1),
            4..=7 => (0b10, 2, 4, 2),
            8..=15 => (0b110, 3, 8, 3),
            16..=31 => (0b1110, 4, 16, 4),
            _ => (0b1111, 4, 32, 8),
        };
        self.bits(1, 1)
            .bits(prefix, prefix_len)
            .bits(count - base, extra_bits)
            .bits(displacement, 10)
    }

    pub fn control(self, ctrl: ControlWord) -> Self {
        self.control_code(ctrl.code())
    }

    pub fn control_code(self, code: u8) -> Self {
        self.bits(CONTROL_MARKER, 9).bits(u32::from(code), 4)
    }

    /// Zero-pad to the next 4-byte boundary.
    pub fn align(mut self) -> Self {
        self.used = 0;
        while self.bytes.len() % 4 != 0 {
            self.bytes.push(0);
        }
        self
    }

    /// EOR followed by alignment padding.
    pub fn eor(self) -> Self {
        self.control(ControlWord::Eor).align()
    }

    /// Total bits written.
    pub fn bit_len(&self) -> usize {
        if self.used == 0 {
            self.bytes.len() * 8
        } else {
            (self.bytes.len() - 1) * 8 + self.used as usize
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[test]
fn test_writer_layout() {
    let data = SldcWriter::new().literals(b"AB").eor().finish();
    assert_eq!(data, [0x20, 0x90, 0xBF, 0xE8]);

    let w = SldcWriter::new().literal(b'A');
    assert_eq!(w.bit_len(), 9);
}
