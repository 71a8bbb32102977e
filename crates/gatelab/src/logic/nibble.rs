//! Four-bit unsigned values.

use serde::{Deserialize, Serialize};

/// A 4-bit unsigned value in `0..=15`.
///
/// Bit 0 is the least significant bit. Construction always masks to the
/// low four bits, so arithmetic wrap-around is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nibble(u8);

impl Nibble {
    /// Largest representable value.
    pub const MAX: Self = Self(0xF);

    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create a nibble from the low four bits of `value`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value & 0xF)
    }

    /// Build a nibble from its bits, most significant first.
    #[must_use]
    pub const fn from_bits(b3: bool, b2: bool, b1: bool, b0: bool) -> Self {
        Self(((b3 as u8) << 3) | ((b2 as u8) << 2) | ((b1 as u8) << 1) | (b0 as u8))
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Read bit `index` (0 = LSB). Indices above 3 read as `false`.
    #[must_use]
    pub const fn bit(self, index: u8) -> bool {
        index < 4 && (self.0 >> index) & 1 == 1
    }

    /// The sign bit when the nibble is read as two's complement.
    #[must_use]
    pub const fn sign(self) -> bool {
        self.bit(3)
    }

    /// Bits in LSB-first order, i.e. `[b0, b1, b2, b3]`.
    #[must_use]
    pub const fn bits_lsb_first(self) -> [bool; 4] {
        [self.bit(0), self.bit(1), self.bit(2), self.bit(3)]
    }

    /// Render as a four-character binary string, MSB first.
    #[must_use]
    pub fn to_binary_string(self) -> String {
        format!("{:04b}", self.0)
    }
}

impl From<Nibble> for u8 {
    fn from(n: Nibble) -> Self {
        n.0
    }
}

impl std::fmt::Display for Nibble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
