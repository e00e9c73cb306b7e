//! WAV container access.
//!
//! The decoder and encoder adapters talk to the container through the
//! [`FrameSource`], [`FrameSink`] and [`SinkFactory`] traits. The `Wav*`
//! types implement them on top of `hound`.
//!
//! Samples cross these traits as raw PCM values: 8-bit samples are unsigned
//! (`0..=255`, silence at 128). hound presents 8-bit samples recentred on
//! zero, so the wrappers shift them back and forth.

use std::io::{self, Read, Seek, Write};

use tracing::warn;

use crate::bitdepth::BitDepth;
use crate::error::{Error, Result};
use crate::format::StreamFormat;

/// Reads interleaved raw PCM samples from a container.
pub trait FrameSource {
    /// Returns the stream format read from the container header.
    fn format(&self) -> StreamFormat;

    /// Reads up to `buf.len()` samples and returns how many were read.
    ///
    /// Returns 0 at end of stream.
    fn read_samples(&mut self, buf: &mut [i32]) -> io::Result<usize>;
}

/// Writes interleaved raw PCM samples to a container.
pub trait FrameSink {
    /// Writes all samples.
    fn write_samples(&mut self, samples: &[i32]) -> io::Result<()>;

    /// Writes trailing container metadata such as chunk sizes.
    fn finalize(self) -> io::Result<()>;
}

/// Creates a [`FrameSink`] once the stream format is known.
pub trait SinkFactory {
    type Sink: FrameSink;

    /// Writes the container header for `format` and returns the sink.
    fn create(self, format: StreamFormat) -> io::Result<Self::Sink>;
}

/// Returns true if hound ran out of bytes in the middle of the data chunk.
fn is_short_read(err: &hound::Error) -> bool {
    match err {
        hound::Error::IoError(e) => {
            e.kind() == io::ErrorKind::UnexpectedEof
                || (e.kind() == io::ErrorKind::Other && e.to_string() == SHORT_READ)
        }
        _ => false,
    }
}

/// hound's message for a read that hit end of stream.
const SHORT_READ: &str = "Failed to read enough bytes.";

fn into_io(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

/// Offset between hound's sample values and raw PCM values.
fn unsigned_offset(depth: BitDepth) -> i32 {
    if depth.is_unsigned() { depth.silence() } else { 0 }
}

/// A [`FrameSource`] reading a WAV stream with hound.
///
/// A data chunk that ends before its declared length is read up to the last
/// whole sample and then treated as end of stream.
pub struct WavSource<R: Read> {
    reader: hound::WavReader<R>,
    format: StreamFormat,
    offset: i32,
    truncated: bool,
}

impl<R: Read> WavSource<R> {
    /// Reads and validates the WAV header.
    ///
    /// Returns [`Error::InvalidContainer`] if the stream is not an integer
    /// PCM WAV, and [`Error::UnsupportedBitDepth`] for widths other than 8,
    /// 16, 24 and 32.
    pub fn new(reader: R) -> Result<Self> {
        let reader = hound::WavReader::new(reader)
            .map_err(|err| Error::InvalidContainer(err.to_string()))?;

        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int {
            return Err(Error::InvalidContainer(
                "floating point samples are not integer PCM".into(),
            ));
        }
        if spec.channels == 0 {
            return Err(Error::InvalidContainer("zero channels".into()));
        }
        let bit_depth = BitDepth::try_from(spec.bits_per_sample)?;

        Ok(Self {
            reader,
            format: StreamFormat {
                channels: usize::from(spec.channels),
                sample_rate: spec.sample_rate,
                bit_depth,
            },
            offset: unsigned_offset(bit_depth),
            truncated: false,
        })
    }

    /// Returns the number of frames declared by the data chunk.
    pub fn duration(&self) -> u32 {
        self.reader.duration()
    }
}

impl<R: Read> FrameSource for WavSource<R> {
    fn format(&self) -> StreamFormat {
        self.format
    }

    fn read_samples(&mut self, buf: &mut [i32]) -> io::Result<usize> {
        if self.truncated {
            return Ok(0);
        }
        let declared = self.reader.len();
        let mut n = 0;
        for (slot, sample) in buf.iter_mut().zip(self.reader.samples::<i32>()) {
            match sample {
                Ok(s) => *slot = s + self.offset,
                Err(e) if is_short_read(&e) => {
                    warn!("WAV data chunk ends before its declared {} samples", declared);
                    self.truncated = true;
                    break;
                }
                Err(e) => return Err(into_io(e)),
            }
            n += 1;
        }
        Ok(n)
    }
}

/// A [`FrameSink`] writing a WAV stream with hound.
pub struct WavSink<W: Write + Seek> {
    writer: hound::WavWriter<W>,
    offset: i32,
}

impl<W: Write + Seek> FrameSink for WavSink<W> {
    fn write_samples(&mut self, samples: &[i32]) -> io::Result<()> {
        for &sample in samples {
            self.writer
                .write_sample(sample - self.offset)
                .map_err(into_io)?;
        }
        Ok(())
    }

    fn finalize(self) -> io::Result<()> {
        self.writer.finalize().map_err(into_io)
    }
}

/// A seekable byte stream a WAV file will be written to.
///
/// The header is written by [`SinkFactory::create`], once the format is
/// known.
pub struct WavTarget<W: Write + Seek>(pub W);

impl<W: Write + Seek> SinkFactory for WavTarget<W> {
    type Sink = WavSink<W>;

    fn create(self, format: StreamFormat) -> io::Result<WavSink<W>> {
        let channels = u16::try_from(format.channels).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("too many channels: {}", format.channels),
            )
        })?;
        let spec = hound::WavSpec {
            channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bit_depth.bits(),
            sample_format: hound::SampleFormat::Int,
        };
        let writer = hound::WavWriter::new(self.0, spec).map_err(into_io)?;
        Ok(WavSink {
            writer,
            offset: unsigned_offset(format.bit_depth),
        })
    }
}
