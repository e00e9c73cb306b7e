//! Reusable per-stream conversion buffers.

use crate::convert::Sampling;
use crate::floating::Floating;

/// Scratch storage for one stream: an interleaved PCM buffer and a float
/// buffer, both sized for `capacity` frames.
///
/// Storage is reallocated only when a different capacity is requested, so a
/// pipeline pushing equal-size buffers converts without allocating.
#[derive(Debug)]
pub struct Scratch {
    sampling: Sampling,
    channels: usize,
    capacity: usize,
    pcm: Vec<i32>,
    floating: Floating,
}

impl Scratch {
    /// Allocates scratch for `channels` channels and `capacity` frames.
    pub fn new(sampling: Sampling, channels: usize, capacity: usize) -> Self {
        Self {
            sampling,
            channels,
            capacity,
            pcm: vec![sampling.bit_depth().silence(); capacity * channels],
            floating: Floating::with_capacity(channels, capacity),
        }
    }

    /// Returns the channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the capacity in frames.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resizes the scratch to `capacity` frames.
    ///
    /// Returns true if storage was reallocated, false if the capacity was
    /// already `capacity` and the existing buffers are reused.
    pub fn reserve(&mut self, capacity: usize) -> bool {
        if capacity == self.capacity {
            return false;
        }
        *self = Self::new(self.sampling, self.channels, capacity);
        true
    }

    /// Returns the interleaved PCM buffer, `capacity * channels` samples long.
    pub fn pcm_mut(&mut self) -> &mut [i32] {
        &mut self.pcm
    }

    /// Converts the first `samples` PCM samples to floats.
    ///
    /// Only whole frames are converted; the returned buffer holds
    /// `samples / channels` frames.
    pub fn decode(&mut self, samples: usize) -> &Floating {
        let samples = samples.min(self.pcm.len());
        self.sampling.decode(&self.pcm[..samples], &mut self.floating);
        &self.floating
    }

    /// Converts `floats` to interleaved PCM.
    ///
    /// The scratch is first resized to the buffer's frame count, so the
    /// returned slice is exactly `floats.len() * channels` samples and never
    /// carries samples from an earlier, longer buffer.
    pub fn encode(&mut self, floats: &Floating) -> &[i32] {
        self.reserve(floats.len());
        let frames = self.sampling.encode(floats, &mut self.pcm);
        &self.pcm[..frames * self.channels]
    }
}
