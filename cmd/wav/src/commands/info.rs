//! Info command.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use giztoy_wav::{BitDepth, Decoder, Pull};
use serde::Serialize;

use super::output_result;
use crate::Cli;

const BUFFER_SIZE: usize = 4096;

/// Show the format of a WAV file.
///
/// The frame count is taken by decoding the whole file.
#[derive(Args)]
pub struct InfoCommand {
    /// Input WAV file
    input: PathBuf,
}

#[derive(Debug, Serialize)]
struct Info {
    channels: usize,
    sample_rate: u32,
    bit_depth: BitDepth,
    frames: u64,
    duration_secs: f64,
}

impl InfoCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let file = File::open(&self.input)
            .with_context(|| format!("failed to open {}", self.input.display()))?;
        let mut decoder = Decoder::open(BufReader::new(file))
            .with_context(|| format!("failed to read {}", self.input.display()))?;

        loop {
            match decoder.pull(BUFFER_SIZE)? {
                Pull::Full(_) => {}
                Pull::Short(_) | Pull::End => break,
            }
        }

        let format = decoder.format();
        let frames = decoder.frames_read();
        let info = Info {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bit_depth: format.bit_depth,
            frames,
            duration_secs: frames as f64 / f64::from(format.sample_rate.max(1)),
        };
        output_result(&info, cli.json)
    }
}
