//! Stream format descriptions.

use serde::{Deserialize, Serialize};

use crate::bitdepth::BitDepth;

/// Signal properties declared by the upstream of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Number of interleaved channels.
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Properties {
    /// Creates properties for `channels` channels at `sample_rate` Hz.
    pub const fn new(channels: usize, sample_rate: u32) -> Self {
        Self { channels, sample_rate }
    }
}

impl Default for Properties {
    /// Mono at 44.1kHz, used when an encoder is flushed before any push.
    fn default() -> Self {
        Self::new(1, 44100)
    }
}

/// Format of one PCM stream, fixed for the stream's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    /// Number of interleaved channels.
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bit_depth: BitDepth,
}

impl StreamFormat {
    /// Combines signal properties with a bit depth.
    pub const fn new(props: Properties, bit_depth: BitDepth) -> Self {
        Self {
            channels: props.channels,
            sample_rate: props.sample_rate,
            bit_depth,
        }
    }

    /// Returns the channel count and sample rate.
    pub const fn properties(&self) -> Properties {
        Properties::new(self.channels, self.sample_rate)
    }
}
