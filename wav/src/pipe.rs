//! Pumps a decoder into an encoder.

use tracing::debug;

use crate::container::{FrameSource, SinkFactory};
use crate::decoder::Decoder;
use crate::encoder::{Encoder, EncoderState};
use crate::error::Result;

/// Counters for one [`copy`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of buffers moved.
    pub buffers: usize,
    /// Number of frames moved.
    pub frames: u64,
}

/// Moves every buffer from `decoder` to `encoder`, then flushes `encoder`.
///
/// Buffers hold at most `buffer_size` frames. The decoder's channel count
/// and sample rate are passed to the encoder unchanged, so an empty input
/// still produces an output with the same format. The first error stops the
/// copy; the encoder is then left unflushed.
pub fn copy<S, F>(
    decoder: &mut Decoder<S>,
    encoder: &mut Encoder<F>,
    buffer_size: usize,
) -> Result<Stats>
where
    S: FrameSource,
    F: SinkFactory,
{
    let props = decoder.format().properties();
    let mut stats = Stats::default();
    if encoder.state() == EncoderState::Configured {
        encoder.start(props)?;
    }

    loop {
        let pull = decoder.pull(buffer_size)?;
        let Some(buf) = pull.buffer() else {
            break;
        };
        encoder.push(props, buf)?;
        stats.buffers += 1;
        stats.frames += buf.len() as u64;
        if pull.is_last() {
            break;
        }
    }

    encoder.flush()?;
    debug!(
        "Copied {} frames in {} buffers ({} -> {})",
        stats.frames,
        stats.buffers,
        decoder.format().bit_depth,
        encoder.bit_depth()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitdepth::BitDepth;
    use crate::error::Error;
    use std::io::Cursor;

    fn sine_wav(frames: usize, channels: u16, bits: u16) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 16000,
            bits_per_sample: bits,
            sample_format: hound::SampleFormat::Int,
        };
        let amplitude = f64::from((1u32 << (bits - 1)) - 1);
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames {
                let v = (i as f64 * 0.05).sin() * amplitude;
                for _ in 0..channels {
                    writer.write_sample(v as i32).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_copy_counts_frames() {
        let input = sine_wav(1000, 2, 16);
        let mut output = Cursor::new(Vec::new());

        let mut decoder = Decoder::open(Cursor::new(input)).unwrap();
        let mut encoder = Encoder::open(&mut output, 24).unwrap();
        let stats = copy(&mut decoder, &mut encoder, 256).unwrap();

        assert_eq!(stats, Stats { buffers: 4, frames: 1000 });
        assert_eq!(encoder.frames_written(), 1000);
        drop(encoder);

        let reader = hound::WavReader::new(Cursor::new(output.into_inner())).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 24);
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.duration(), 1000);
    }

    #[test]
    fn test_copy_empty_stream() {
        let input = sine_wav(0, 1, 16);
        let mut output = Cursor::new(Vec::new());

        let mut decoder = Decoder::open(Cursor::new(input)).unwrap();
        let mut encoder = Encoder::open(&mut output, 8).unwrap();
        let stats = copy(&mut decoder, &mut encoder, 64).unwrap();

        assert_eq!(stats, Stats::default());
        drop(encoder);
        let reader = hound::WavReader::new(Cursor::new(output.into_inner())).unwrap();
        assert_eq!(reader.duration(), 0);
        assert_eq!(reader.spec().bits_per_sample, 8);
        assert_eq!(reader.spec().sample_rate, 16000);
    }

    #[test]
    fn test_copy_zero_buffer_size() {
        let input = sine_wav(10, 1, 16);
        let mut decoder = Decoder::open(Cursor::new(input)).unwrap();
        let mut encoder = Encoder::open(Cursor::new(Vec::new()), 16).unwrap();

        assert!(matches!(
            copy(&mut decoder, &mut encoder, 0),
            Err(Error::InvalidCapacity(0))
        ));
        assert_eq!(decoder.format().bit_depth, BitDepth::Sixteen);
    }
}
