//! Channel-major floating point signal buffer.

use crate::error::{Error, Result};

/// A multichannel buffer of normalized `f64` samples.
///
/// Samples are stored per channel (channel-major). Every channel always has
/// the same length, which is the buffer's length in frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Floating {
    data: Vec<Vec<f64>>,
    frames: usize,
}

impl Floating {
    /// Creates an empty buffer with room for `capacity` frames per channel.
    pub fn with_capacity(channels: usize, capacity: usize) -> Self {
        Self {
            data: (0..channels).map(|_| Vec::with_capacity(capacity)).collect(),
            frames: 0,
        }
    }

    /// Creates a buffer of `frames` frames of silence.
    pub fn zeroed(channels: usize, frames: usize) -> Self {
        Self {
            data: vec![vec![0.0; frames]; channels],
            frames,
        }
    }

    /// Creates a buffer from per-channel sample vectors.
    ///
    /// Fails if there are no channels or the channels differ in length.
    pub fn from_channels(data: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = data.first() else {
            return Err(Error::InvalidChannels(0));
        };
        let frames = first.len();
        for (channel, samples) in data.iter().enumerate() {
            if samples.len() != frames {
                return Err(Error::ChannelLength {
                    channel,
                    expected: frames,
                    got: samples.len(),
                });
            }
        }
        Ok(Self { data, frames })
    }

    /// Returns the number of channels.
    pub fn channels(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.frames
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Returns how many frames fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.iter().map(Vec::capacity).min().unwrap_or(0)
    }

    /// Returns the samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn channel(&self, channel: usize) -> &[f64] {
        &self.data[channel]
    }

    /// Returns the samples of one channel for modification.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f64] {
        &mut self.data[channel]
    }

    /// Iterates over the channels in order.
    pub fn iter_channels(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Sets the length of every channel to `frames`.
    ///
    /// New samples are silence. Storage is kept when shrinking.
    pub(crate) fn resize(&mut self, frames: usize) {
        for samples in &mut self.data {
            samples.resize(frames, 0.0);
        }
        self.frames = frames;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_capacity() {
        let buf = Floating::with_capacity(2, 512);
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 512);
    }

    #[test]
    fn test_zeroed() {
        let buf = Floating::zeroed(3, 4);
        assert_eq!(buf.len(), 4);
        for ch in buf.iter_channels() {
            assert_eq!(ch, &[0.0; 4]);
        }
    }

    #[test]
    fn test_from_channels() {
        let buf = Floating::from_channels(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.channel(1), &[0.3, 0.4]);
    }

    #[test]
    fn test_from_channels_uneven() {
        let err = Floating::from_channels(vec![vec![0.1, 0.2], vec![0.3]]).unwrap_err();
        match err {
            Error::ChannelLength { channel, expected, got } => {
                assert_eq!((channel, expected, got), (1, 2, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_channels_empty() {
        assert!(matches!(
            Floating::from_channels(Vec::new()),
            Err(Error::InvalidChannels(0))
        ));
    }

    #[test]
    fn test_resize_keeps_storage() {
        let mut buf = Floating::with_capacity(2, 8);
        buf.resize(8);
        let ptr = buf.channel(0).as_ptr();
        buf.resize(3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.channel(1).len(), 3);
        buf.resize(8);
        assert_eq!(buf.channel(0).as_ptr(), ptr);
    }
}
