//! Streaming WAV encoder adapter.

use std::fmt;
use std::io::{Seek, Write};

use tracing::{debug, warn};

use crate::bitdepth::BitDepth;
use crate::container::{FrameSink, SinkFactory, WavTarget};
use crate::convert::Sampling;
use crate::error::{Error, Result};
use crate::floating::Floating;
use crate::format::{Properties, StreamFormat};
use crate::scratch::Scratch;

/// Lifecycle of an [`Encoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// Bit depth validated; waiting for the stream properties.
    Configured,
    /// Container header written; buffers can be pushed.
    Streaming,
    /// Container finalized.
    Flushed,
    /// Creating, writing or finalizing the container failed.
    Failed,
}

impl EncoderState {
    /// Returns the lowercase state name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            EncoderState::Configured => "configured",
            EncoderState::Streaming => "streaming",
            EncoderState::Flushed => "flushed",
            EncoderState::Failed => "failed",
        }
    }
}

impl fmt::Display for EncoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Stage<F: SinkFactory> {
    Configured(F),
    Streaming { sink: F::Sink, scratch: Scratch },
    Flushed,
    Failed,
}

impl<F: SinkFactory> Stage<F> {
    fn state(&self) -> EncoderState {
        match self {
            Stage::Configured(_) => EncoderState::Configured,
            Stage::Streaming { .. } => EncoderState::Streaming,
            Stage::Flushed => EncoderState::Flushed,
            Stage::Failed => EncoderState::Failed,
        }
    }
}

/// Converts float buffers to raw PCM and writes them to a container.
///
/// The container header needs the channel count and sample rate, which are
/// only known once the upstream declares them. [`Encoder::start`] performs
/// that `Configured -> Streaming` transition; the first [`Encoder::push`]
/// calls it implicitly.
///
/// # Example
///
/// ```no_run
/// use giztoy_wav::{Encoder, Floating, Properties};
///
/// let file = std::io::BufWriter::new(std::fs::File::create("out.wav")?);
/// let mut encoder = Encoder::open(file, 16)?;
/// let silence = Floating::zeroed(2, 512);
/// encoder.push(Properties::new(2, 44100), &silence)?;
/// encoder.flush()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Encoder<F: SinkFactory> {
    bit_depth: BitDepth,
    stage: Stage<F>,
    format: Option<StreamFormat>,
    frames_written: u64,
}

impl<W: Write + Seek> Encoder<WavTarget<W>> {
    /// Prepares a WAV encoder writing `bit_depth`-bit PCM to `writer`.
    ///
    /// Nothing is written until the stream properties are known.
    /// Fails with [`Error::UnsupportedBitDepth`] unless `bit_depth` is 8,
    /// 16, 24 or 32.
    pub fn open(writer: W, bit_depth: u16) -> Result<Self> {
        Self::new(WavTarget(writer), bit_depth)
    }
}

impl<F: SinkFactory> Encoder<F> {
    /// Prepares an encoder that creates its sink with `factory`.
    pub fn new(factory: F, bit_depth: u16) -> Result<Self> {
        let bit_depth = BitDepth::try_from(bit_depth)?;
        Ok(Self {
            bit_depth,
            stage: Stage::Configured(factory),
            format: None,
            frames_written: 0,
        })
    }

    /// Returns the output bit depth.
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Returns the stream format, once started.
    pub fn format(&self) -> Option<StreamFormat> {
        self.format
    }

    /// Returns the current state.
    pub fn state(&self) -> EncoderState {
        self.stage.state()
    }

    /// Returns the number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Writes the container header for `props` and starts streaming.
    ///
    /// Only valid while `Configured`.
    pub fn start(&mut self, props: Properties) -> Result<()> {
        if !matches!(self.stage, Stage::Configured(_)) {
            return Err(self.state_error("start"));
        }
        if props.channels == 0 {
            return Err(Error::InvalidChannels(props.channels));
        }
        let Stage::Configured(factory) = std::mem::replace(&mut self.stage, Stage::Failed) else {
            return Err(self.state_error("start"));
        };

        let format = StreamFormat::new(props, self.bit_depth);
        let sink = factory.create(format).map_err(|e| {
            warn!("Failed to create WAV encoder: {}", e);
            Error::io("creating WAV encoder", e)
        })?;
        debug!(
            "Started WAV encoder: {} channel(s), {}Hz, {}",
            format.channels, format.sample_rate, format.bit_depth
        );

        self.stage = Stage::Streaming {
            sink,
            scratch: Scratch::new(Sampling::new(self.bit_depth), format.channels, 0),
        };
        self.format = Some(format);
        Ok(())
    }

    /// Converts `floats` to PCM and writes it.
    ///
    /// Starts the stream with `props` on the first push. Afterwards the
    /// channel count must stay the same; the sample rate is passed through
    /// as given on the first push.
    pub fn push(&mut self, props: Properties, floats: &Floating) -> Result<()> {
        if matches!(self.stage, Stage::Configured(_)) {
            self.start(props)?;
        }
        let (sink, scratch) = match &mut self.stage {
            Stage::Streaming { sink, scratch } => (sink, scratch),
            stage => {
                return Err(Error::State {
                    op: "push",
                    state: stage.state().as_str(),
                });
            }
        };

        let channels = scratch.channels();
        if props.channels != channels {
            return Err(Error::ChannelMismatch {
                expected: channels,
                got: props.channels,
            });
        }
        if floats.channels() != channels {
            return Err(Error::ChannelMismatch {
                expected: channels,
                got: floats.channels(),
            });
        }

        let result = sink.write_samples(scratch.encode(floats));
        if let Err(e) = result {
            warn!("WAV encoder failed after {} frames: {}", self.frames_written, e);
            self.stage = Stage::Failed;
            return Err(Error::io("writing PCM buffer", e));
        }
        self.frames_written += floats.len() as u64;
        Ok(())
    }

    /// Finalizes the container.
    ///
    /// If nothing was pushed the stream is started with
    /// [`Properties::default`] so the output is an empty but valid WAV.
    pub fn flush(&mut self) -> Result<()> {
        if matches!(self.stage, Stage::Configured(_)) {
            debug!("Flushing WAV encoder before any push");
            self.start(Properties::default())?;
        }
        match std::mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Streaming { sink, .. } => {
                sink.finalize()
                    .map_err(|e| Error::io("flushing WAV encoder", e))?;
                debug!("Flushed WAV encoder after {} frames", self.frames_written);
                self.stage = Stage::Flushed;
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.state_error("flush"))
            }
        }
    }

    fn state_error(&self, op: &'static str) -> Error {
        Error::State {
            op,
            state: self.state().as_str(),
        }
    }
}
