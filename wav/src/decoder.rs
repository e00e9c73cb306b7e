//! Streaming WAV decoder adapter.

use std::fmt;
use std::io::Read;

use tracing::{debug, warn};

use crate::container::{FrameSource, WavSource};
use crate::convert::Sampling;
use crate::error::{Error, Result};
use crate::floating::Floating;
use crate::format::StreamFormat;
use crate::scratch::Scratch;

/// Result of one [`Decoder::pull`].
#[derive(Debug)]
pub enum Pull<'a> {
    /// A buffer holding exactly the requested number of frames.
    Full(&'a Floating),
    /// A buffer shorter than requested. This is the last buffer with data.
    Short(&'a Floating),
    /// No frames left. Not an error.
    End,
}

impl<'a> Pull<'a> {
    /// Returns the decoded buffer, if any.
    pub fn buffer(&self) -> Option<&'a Floating> {
        match *self {
            Pull::Full(buf) | Pull::Short(buf) => Some(buf),
            Pull::End => None,
        }
    }

    /// Returns true if no further data follows.
    pub fn is_last(&self) -> bool {
        !matches!(self, Pull::Full(_))
    }
}

/// Lifecycle of a [`Decoder`].
///
/// A decoder only exists once its header has been validated, so it starts
/// out `Streaming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Buffers can be pulled.
    Streaming,
    /// A pull returned [`Pull::End`].
    Exhausted,
    /// The underlying stream failed; the decoder is unusable.
    Failed,
}

impl DecoderState {
    /// Returns the lowercase state name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            DecoderState::Streaming => "streaming",
            DecoderState::Exhausted => "exhausted",
            DecoderState::Failed => "failed",
        }
    }
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pulls raw PCM from a container and converts it to float buffers.
///
/// Scratch buffers are reused across pulls of equal capacity. A decoder is
/// driven by one caller at a time; every method takes `&mut self`.
///
/// # Example
///
/// ```no_run
/// use giztoy_wav::{Decoder, Pull};
///
/// let file = std::io::BufReader::new(std::fs::File::open("in.wav")?);
/// let mut decoder = Decoder::open(file)?;
/// loop {
///     match decoder.pull(512)? {
///         Pull::Full(buf) => println!("{} frames", buf.len()),
///         Pull::Short(buf) => println!("last {} frames", buf.len()),
///         Pull::End => break,
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Decoder<S: FrameSource> {
    source: S,
    format: StreamFormat,
    scratch: Scratch,
    state: DecoderState,
    frames_read: u64,
}

impl<R: Read> Decoder<WavSource<R>> {
    /// Reads the WAV header from `reader` and returns a decoder for it.
    ///
    /// Fails with [`Error::InvalidContainer`] if `reader` is not a valid WAV
    /// stream.
    pub fn open(reader: R) -> Result<Self> {
        Self::new(WavSource::new(reader)?)
    }
}

impl<S: FrameSource> Decoder<S> {
    /// Creates a decoder over an already validated source.
    pub fn new(source: S) -> Result<Self> {
        let format = source.format();
        if format.channels == 0 {
            return Err(Error::InvalidContainer("zero channels".into()));
        }
        debug!(
            "Opened WAV decoder: {} channel(s), {}Hz, {}",
            format.channels, format.sample_rate, format.bit_depth
        );
        Ok(Self {
            source,
            format,
            scratch: Scratch::new(Sampling::new(format.bit_depth), format.channels, 0),
            state: DecoderState::Streaming,
            frames_read: 0,
        })
    }

    /// Returns the stream format.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Returns the current state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Returns the number of frames decoded so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Reads up to `capacity` frames and converts them to floats.
    ///
    /// The returned buffer is owned by the decoder and valid until the next
    /// call. A short read yields [`Pull::Short`] with the frames that were
    /// available. Once the source is drained the decoder answers
    /// [`Pull::End`] and becomes `Exhausted`; pulling again is an error.
    pub fn pull(&mut self, capacity: usize) -> Result<Pull<'_>> {
        if self.state != DecoderState::Streaming {
            return Err(Error::State {
                op: "pull",
                state: self.state.as_str(),
            });
        }
        if capacity == 0 || capacity.checked_mul(self.format.channels).is_none() {
            return Err(Error::InvalidCapacity(capacity));
        }

        self.scratch.reserve(capacity);
        let read = match self.source.read_samples(self.scratch.pcm_mut()) {
            Ok(n) => n,
            Err(e) => {
                warn!("WAV decoder failed after {} frames: {}", self.frames_read, e);
                self.state = DecoderState::Failed;
                return Err(Error::io("reading PCM buffer", e));
            }
        };

        let frames = read / self.format.channels;
        if frames == 0 {
            debug!("WAV decoder reached end of stream after {} frames", self.frames_read);
            self.state = DecoderState::Exhausted;
            return Ok(Pull::End);
        }
        self.frames_read += frames as u64;

        let floats = self.scratch.decode(read);
        if frames < capacity {
            Ok(Pull::Short(floats))
        } else {
            Ok(Pull::Full(floats))
        }
    }
}
