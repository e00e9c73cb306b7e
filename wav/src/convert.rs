//! Conversion between interleaved integer PCM and channel-major floats.
//!
//! Signed depths map `sample / 2^(bits-1)`. 8-bit WAV samples are unsigned
//! and are recentred first: `(sample - 128) / 128`, so silence is 128.
//!
//! Encoding rounds to the nearest integer and clamps to the range of the
//! bit depth. Out-of-range floats saturate instead of wrapping, and NaN
//! encodes as silence.

use crate::bitdepth::BitDepth;
use crate::floating::Floating;

/// Integer representation of PCM samples at a given bit depth.
///
/// Selected once per stream from the bit depth, see [`Sampling::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Two's-complement samples centred on zero.
    Signed(BitDepth),
    /// Offset-binary samples centred on `2^(bits-1)`.
    Unsigned(BitDepth),
}

impl Sampling {
    /// Returns the WAV representation for `depth`: unsigned for 8-bit,
    /// signed otherwise.
    pub fn new(depth: BitDepth) -> Self {
        if depth.is_unsigned() {
            Sampling::Unsigned(depth)
        } else {
            Sampling::Signed(depth)
        }
    }

    /// Returns the bit depth.
    pub fn bit_depth(self) -> BitDepth {
        match self {
            Sampling::Signed(depth) | Sampling::Unsigned(depth) => depth,
        }
    }

    /// Converts one raw sample to a normalized float.
    #[inline]
    pub fn to_float(self, sample: i32) -> f64 {
        match self {
            Sampling::Signed(depth) => f64::from(sample) / depth.scale(),
            Sampling::Unsigned(depth) => {
                (f64::from(sample) - depth.scale()) / depth.scale()
            }
        }
    }

    /// Converts one normalized float to a raw sample.
    #[inline]
    pub fn from_float(self, value: f64) -> i32 {
        let depth = self.bit_depth();
        if value.is_nan() {
            return depth.silence();
        }
        let scaled = match self {
            Sampling::Signed(_) => (value * depth.scale()).round(),
            Sampling::Unsigned(_) => (value * depth.scale()).round() + depth.scale(),
        };
        scaled.clamp(f64::from(depth.min()), f64::from(depth.max())) as i32
    }

    /// Deinterleaves `pcm` into `out` and returns the number of frames.
    ///
    /// The channel count is taken from `out`, which is resized to the number
    /// of whole frames in `pcm`. A trailing incomplete frame is ignored.
    pub fn decode(self, pcm: &[i32], out: &mut Floating) -> usize {
        let scale = self.bit_depth().scale();
        match self {
            Sampling::Signed(_) => deinterleave(pcm, out, |s| f64::from(s) / scale),
            Sampling::Unsigned(_) => deinterleave(pcm, out, |s| (f64::from(s) - scale) / scale),
        }
    }

    /// Interleaves `floats` into `pcm` and returns the number of frames.
    ///
    /// Writes `frames * channels` samples at the start of `pcm`, where
    /// `frames` is the smaller of the buffer length and what fits in `pcm`.
    pub fn encode(self, floats: &Floating, pcm: &mut [i32]) -> usize {
        interleave(floats, pcm, |v| self.from_float(v))
    }
}

fn deinterleave(pcm: &[i32], out: &mut Floating, convert: impl Fn(i32) -> f64) -> usize {
    let channels = out.channels();
    if channels == 0 {
        return 0;
    }
    let frames = pcm.len() / channels;
    out.resize(frames);
    for c in 0..channels {
        let dst = out.channel_mut(c);
        for (d, &s) in dst.iter_mut().zip(pcm.iter().skip(c).step_by(channels)) {
            *d = convert(s);
        }
    }
    frames
}

fn interleave(floats: &Floating, pcm: &mut [i32], convert: impl Fn(f64) -> i32) -> usize {
    let channels = floats.channels();
    if channels == 0 {
        return 0;
    }
    let frames = floats.len().min(pcm.len() / channels);
    for (c, src) in floats.iter_channels().enumerate() {
        for (i, &v) in src[..frames].iter().enumerate() {
            pcm[i * channels + c] = convert(v);
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selects_sign() {
        assert_eq!(Sampling::new(BitDepth::Eight), Sampling::Unsigned(BitDepth::Eight));
        assert_eq!(Sampling::new(BitDepth::Sixteen), Sampling::Signed(BitDepth::Sixteen));
        assert_eq!(Sampling::new(BitDepth::TwentyFour), Sampling::Signed(BitDepth::TwentyFour));
        assert_eq!(Sampling::new(BitDepth::ThirtyTwo), Sampling::Signed(BitDepth::ThirtyTwo));
    }

    #[test]
    fn test_unsigned_offset() {
        let s = Sampling::new(BitDepth::Eight);
        assert_eq!(s.to_float(128), 0.0);
        assert_eq!(s.to_float(0), -1.0);
        assert_eq!(s.to_float(255), 127.0 / 128.0);
        assert_eq!(s.from_float(0.0), 128);
        assert_eq!(s.from_float(-1.0), 0);
        assert_eq!(s.from_float(1.0), 255);
    }

    #[test]
    fn test_signed_scale() {
        let s = Sampling::new(BitDepth::Sixteen);
        assert_eq!(s.to_float(0), 0.0);
        assert_eq!(s.to_float(-32768), -1.0);
        assert_eq!(s.to_float(16384), 0.5);
        assert_eq!(s.from_float(0.5), 16384);
        assert_eq!(s.from_float(-1.0), -32768);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let s16 = Sampling::new(BitDepth::Sixteen);
        assert_eq!(s16.from_float(1.0), 32767);
        assert_eq!(s16.from_float(2.5), 32767);
        assert_eq!(s16.from_float(-3.0), -32768);

        let s8 = Sampling::new(BitDepth::Eight);
        assert_eq!(s8.from_float(4.0), 255);
        assert_eq!(s8.from_float(-4.0), 0);

        let s32 = Sampling::new(BitDepth::ThirtyTwo);
        assert_eq!(s32.from_float(1.0), i32::MAX);
        assert_eq!(s32.from_float(-1.0), i32::MIN);
    }

    #[test]
    fn test_nan_is_silence() {
        assert_eq!(Sampling::new(BitDepth::Eight).from_float(f64::NAN), 128);
        assert_eq!(Sampling::new(BitDepth::TwentyFour).from_float(f64::NAN), 0);
    }

    #[test]
    fn test_round_trip_within_quantization() {
        for depth in BitDepth::ALL {
            let s = Sampling::new(depth);
            let step = 1.0 / depth.scale();
            for i in -20..=20 {
                let x = i as f64 / 20.0;
                let y = s.to_float(s.from_float(x));
                assert!(
                    (x - y).abs() <= step,
                    "{depth}: {x} decoded as {y}"
                );
            }
        }
    }

    #[test]
    fn test_quantized_values_are_exact() {
        for depth in BitDepth::ALL {
            let s = Sampling::new(depth);
            let span = i64::from(depth.max()) - i64::from(depth.min());
            for k in 0..=64i64 {
                let raw = (i64::from(depth.min()) + span * k / 64) as i32;
                assert_eq!(s.from_float(s.to_float(raw)), raw, "{depth}: raw {raw}");
            }
        }
    }

    #[test]
    fn test_deinterleave_stereo() {
        let s = Sampling::new(BitDepth::Sixteen);
        let pcm = [0, 16384, -16384, 8192, 32767, -32768];
        let mut out = Floating::with_capacity(2, 3);

        let frames = s.decode(&pcm, &mut out);
        assert_eq!(frames, 3);
        assert_eq!(out.channel(0), &[0.0, -0.5, 32767.0 / 32768.0]);
        assert_eq!(out.channel(1), &[0.5, 0.25, -1.0]);
    }

    #[test]
    fn test_decode_drops_incomplete_frame() {
        let s = Sampling::new(BitDepth::Eight);
        let pcm = [128, 0, 255, 128, 64];
        let mut out = Floating::with_capacity(2, 4);

        assert_eq!(s.decode(&pcm, &mut out), 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out.channel(0), &[0.0, 127.0 / 128.0]);
        assert_eq!(out.channel(1), &[-1.0, 0.0]);
    }

    #[test]
    fn test_interleave_inverts_deinterleave() {
        let s = Sampling::new(BitDepth::TwentyFour);
        let pcm: Vec<i32> = vec![1, -2, 3, -4, 5, -6, 7, -8, 9];
        let mut floats = Floating::with_capacity(3, 3);
        s.decode(&pcm, &mut floats);

        let mut back = vec![0; pcm.len()];
        assert_eq!(s.encode(&floats, &mut back), 3);
        assert_eq!(back, pcm);
    }

    #[test]
    fn test_encode_limited_by_pcm_len() {
        let s = Sampling::new(BitDepth::Sixteen);
        let floats = Floating::from_channels(vec![vec![0.5; 4], vec![-0.5; 4]]).unwrap();
        let mut pcm = vec![7; 5];

        assert_eq!(s.encode(&floats, &mut pcm), 2);
        assert_eq!(pcm, vec![16384, -16384, 16384, -16384, 7]);
    }
}
