//! Streaming WAV PCM decoding and encoding.
//!
//! This crate converts between interleaved integer PCM stored in WAV files
//! and channel-major floating point buffers, one buffer at a time:
//!
//! - [`Decoder`]: pulls PCM from a WAV stream and yields [`Floating`] buffers
//! - [`Encoder`]: takes [`Floating`] buffers and writes PCM to a WAV stream
//! - [`Sampling`]: the sample conversion for one [`BitDepth`]
//! - [`pipe::copy`]: pumps a decoder into an encoder
//!
//! Supported bit depths are 8, 16, 24 and 32. 8-bit samples are unsigned
//! with silence at 128, wider samples are signed.
//!
//! # Example
//!
//! ```rust
//! use giztoy_wav::{Decoder, Encoder, Floating, Properties, Pull};
//! use std::io::Cursor;
//!
//! // Encode 1000 frames of stereo silence as 16-bit PCM.
//! let mut wav = Cursor::new(Vec::new());
//! let mut encoder = Encoder::open(&mut wav, 16)?;
//! encoder.push(Properties::new(2, 44100), &Floating::zeroed(2, 1000))?;
//! encoder.flush()?;
//! drop(encoder);
//!
//! // Decode it again, 512 frames at a time.
//! wav.set_position(0);
//! let mut decoder = Decoder::open(wav)?;
//! assert!(matches!(decoder.pull(512)?, Pull::Full(_)));
//! match decoder.pull(512)? {
//!     Pull::Short(buf) => assert_eq!(buf.len(), 488),
//!     _ => unreachable!(),
//! }
//! assert!(matches!(decoder.pull(512)?, Pull::End));
//! # Ok::<(), giztoy_wav::Error>(())
//! ```

mod bitdepth;
pub mod container;
mod convert;
mod decoder;
mod encoder;
mod error;
mod floating;
mod format;
pub mod pipe;
mod scratch;

pub use bitdepth::BitDepth;
pub use container::{FrameSink, FrameSource, SinkFactory, WavSink, WavSource, WavTarget};
pub use convert::Sampling;
pub use decoder::{Decoder, DecoderState, Pull};
pub use encoder::{Encoder, EncoderState};
pub use error::{Error, Result};
pub use floating::Floating;
pub use format::{Properties, StreamFormat};
pub use scratch::Scratch;
