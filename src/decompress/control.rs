//! Control words.
//!
//! A control word is the 9-bit marker `1_1111_1111` followed by a 4-bit code.
//! Scheme 1 literals start with a 0 bit and a copy pointer with a valid match
//! count (at most 271) starts with at most eight 1 bits, so the marker never
//! collides with a data symbol.

use super::bit_reader::{BitReader, CONTROL_MARKER, CONTROL_MARKER_BITS};
use super::{DecompressError, Result};
use std::fmt;

/// Width of the control code that follows the marker.
pub const CONTROL_CODE_BITS: u32 = 4;

/// Control operations defined by ECMA-321.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlWord {
    /// Pad to the next 4-byte boundary
    Flush = 0x0,
    /// Switch to Scheme 1
    Scheme1 = 0x1,
    /// Switch to Scheme 2
    Scheme2 = 0x2,
    /// Tape file mark
    FileMark = 0x3,
    /// End of record
    Eor = 0x4,
    /// Reset history, then Scheme 1
    Reset1 = 0x5,
    /// Reset history, then Scheme 2
    Reset2 = 0x6,
    /// No more records
    EndMarker = 0xF,
}

impl ControlWord {
    /// Map a 4-bit code to its control word. Codes 7-14 are undefined.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x0 => Some(Self::Flush),
            0x1 => Some(Self::Scheme1),
            0x2 => Some(Self::Scheme2),
            0x3 => Some(Self::FileMark),
            0x4 => Some(Self::Eor),
            0x5 => Some(Self::Reset1),
            0x6 => Some(Self::Reset2),
            0xF => Some(Self::EndMarker),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Flush => "Flush",
            Self::Scheme1 => "Scheme 1",
            Self::Scheme2 => "Scheme 2",
            Self::FileMark => "File Mark",
            Self::Eor => "EOR",
            Self::Reset1 => "Reset 1",
            Self::Reset2 => "Reset 2",
            Self::EndMarker => "End Marker",
        }
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Consume a control word at the cursor.
///
/// Callers normally check [`BitReader::is_control`] first; the marker is
/// still verified here.
pub fn read_control(reader: &mut BitReader<'_>) -> Result<ControlWord> {
    let marker = reader.get(CONTROL_MARKER_BITS)?;
    if marker != CONTROL_MARKER {
        return Err(DecompressError::InvalidControlSymbol(u8::MAX));
    }

    let code = reader.get(CONTROL_CODE_BITS)? as u8;
    ControlWord::from_code(code).ok_or(DecompressError::InvalidControlSymbol(code))
}
