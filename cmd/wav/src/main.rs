//! WAV CLI - transcode and inspect PCM WAV files.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::{ConfigCommand, ConvertCommand, InfoCommand};

/// WAV CLI - transcode and inspect PCM WAV files.
///
/// Audio is streamed through float buffers one block at a time, so files of
/// any length are converted in constant memory.
///
/// Defaults are read from ~/.giztoy/wav/config.yaml.
#[derive(Parser)]
#[command(name = "wav")]
#[command(about = "WAV PCM transcoding tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.giztoy/wav/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Convert a WAV file to another bit depth
    Convert(ConvertCommand),
    /// Show the format of a WAV file
    Info(InfoCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Convert(cmd) => cmd.run(&cli),
        Commands::Info(cmd) => cmd.run(&cli),
    }
}
