//! Error types for giztoy-wav.

use std::io;

/// Result type alias for giztoy-wav.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for WAV stream operations.
///
/// End of stream and short buffers are not errors; see [`crate::Pull`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte stream is not a structurally valid WAV container.
    #[error("invalid WAV: {0}")]
    InvalidContainer(String),

    /// Bit depth outside of 8, 16, 24 and 32.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// The underlying stream or container codec failed.
    #[error("error {op}: {source}")]
    Io {
        /// Operation that failed.
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Operation is not valid in the adapter's current state.
    #[error("cannot {op} in state {state}")]
    State {
        op: &'static str,
        state: &'static str,
    },

    /// Buffer channel count differs from the stream's.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch { expected: usize, got: usize },

    /// Channels of one float buffer differ in length.
    #[error("channel {channel} has {got} samples, expected {expected}")]
    ChannelLength {
        channel: usize,
        expected: usize,
        got: usize,
    },

    /// A stream needs at least one channel.
    #[error("invalid channel count: {0}")]
    InvalidChannels(usize),

    /// A pull needs room for at least one frame.
    #[error("invalid buffer capacity: {0}")]
    InvalidCapacity(usize),
}

impl Error {
    pub(crate) fn io(op: &'static str, source: io::Error) -> Self {
        Error::Io { op, source }
    }

    /// Returns true if the error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}
