//! Register definitions for the Chip64 register file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// General-purpose register (r0-rF).
///
/// rF doubles as the flag register: the arithmetic opcodes write their
/// carry/borrow/shift-capture bit there after the result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    RA = 10,
    RB = 11,
    RC = 12,
    RD = 13,
    RE = 14,
    RF = 15,
}

impl Register {
    /// The carry/borrow/shift-capture flag register.
    pub const FLAG: Self = Self::RF;

    /// Register named by a nibble. Every nibble value names a register, so
    /// the conversion is total.
    #[inline]
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x0 => Self::R0,
            0x1 => Self::R1,
            0x2 => Self::R2,
            0x3 => Self::R3,
            0x4 => Self::R4,
            0x5 => Self::R5,
            0x6 => Self::R6,
            0x7 => Self::R7,
            0x8 => Self::R8,
            0x9 => Self::R9,
            0xA => Self::RA,
            0xB => Self::RB,
            0xC => Self::RC,
            0xD => Self::RD,
            0xE => Self::RE,
            _ => Self::RF,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{:X}", self.index())
    }
}
