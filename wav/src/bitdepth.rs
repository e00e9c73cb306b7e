//! Supported PCM sample widths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Bits per PCM sample.
///
/// 8-bit WAV PCM is unsigned with silence at 128; wider depths are signed
/// two's-complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    /// 8-bit unsigned.
    Eight,
    /// 16-bit signed.
    Sixteen,
    /// 24-bit signed.
    TwentyFour,
    /// 32-bit signed.
    ThirtyTwo,
}

impl BitDepth {
    /// All supported bit depths in ascending order.
    pub const ALL: [BitDepth; 4] = [
        BitDepth::Eight,
        BitDepth::Sixteen,
        BitDepth::TwentyFour,
        BitDepth::ThirtyTwo,
    ];

    /// Returns the number of bits per sample.
    pub const fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// Returns true for 8-bit, which WAV stores as unsigned samples.
    pub const fn is_unsigned(self) -> bool {
        matches!(self, BitDepth::Eight)
    }

    /// Normalization constant, `2^(bits-1)`.
    pub fn scale(self) -> f64 {
        (1u64 << (self.bits() - 1)) as f64
    }

    /// Smallest raw PCM value.
    pub const fn min(self) -> i32 {
        match self {
            BitDepth::Eight => 0,
            BitDepth::Sixteen => i16::MIN as i32,
            BitDepth::TwentyFour => -(1 << 23),
            BitDepth::ThirtyTwo => i32::MIN,
        }
    }

    /// Largest raw PCM value.
    pub const fn max(self) -> i32 {
        match self {
            BitDepth::Eight => u8::MAX as i32,
            BitDepth::Sixteen => i16::MAX as i32,
            BitDepth::TwentyFour => (1 << 23) - 1,
            BitDepth::ThirtyTwo => i32::MAX,
        }
    }

    /// Raw PCM value of silence.
    pub const fn silence(self) -> i32 {
        if self.is_unsigned() { 128 } else { 0 }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(Error::UnsupportedBitDepth(other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> u16 {
        depth.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
