//! Convert command.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use giztoy_wav::{pipe, BitDepth, Decoder, Encoder};
use serde::Serialize;
use tracing::debug;

use super::{get_config, output_result, print_success};
use crate::Cli;

/// Convert a WAV file to another bit depth.
///
/// Channels and sample rate are kept. Samples are clamped to the
/// range of the output bit depth.
#[derive(Args)]
pub struct ConvertCommand {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Output bit depth: 8, 16, 24 or 32 (default from config)
    #[arg(short = 'b', long)]
    bit_depth: Option<u16>,

    /// Frames per buffer (default from config)
    #[arg(long)]
    buffer_size: Option<usize>,
}

#[derive(Serialize)]
struct ConvertResult<'a> {
    input: &'a PathBuf,
    output: &'a PathBuf,
    bit_depth: BitDepth,
    buffers: usize,
    frames: u64,
}

impl ConvertCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;

        // Checked before the output file is created.
        let bit_depth = match self.bit_depth {
            Some(bits) => BitDepth::try_from(bits)?,
            None => cfg.bit_depth,
        };
        let buffer_size = self.buffer_size.unwrap_or(cfg.buffer_size);
        if buffer_size == 0 {
            anyhow::bail!("buffer size must be positive");
        }

        debug!(
            "Converting {} -> {} ({}, {} frames per buffer)",
            self.input.display(),
            self.output.display(),
            bit_depth,
            buffer_size
        );

        let input = File::open(&self.input)
            .with_context(|| format!("failed to open {}", self.input.display()))?;
        let mut decoder = Decoder::open(BufReader::new(input))
            .with_context(|| format!("failed to read {}", self.input.display()))?;

        let output = File::create(&self.output)
            .with_context(|| format!("failed to create {}", self.output.display()))?;
        let mut encoder = Encoder::open(BufWriter::new(output), bit_depth.bits())?;

        let stats = pipe::copy(&mut decoder, &mut encoder, buffer_size)
            .with_context(|| format!("failed to convert {}", self.input.display()))?;

        if cli.json {
            return output_result(
                &ConvertResult {
                    input: &self.input,
                    output: &self.output,
                    bit_depth,
                    buffers: stats.buffers,
                    frames: stats.frames,
                },
                true,
            );
        }

        print_success(&format!(
            "Converted {} frames ({} -> {}) to {}",
            stats.frames,
            decoder.format().bit_depth,
            bit_depth,
            self.output.display()
        ));
        Ok(())
    }
}
