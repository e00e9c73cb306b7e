//! Configuration management commands.

use clap::{Args, Subcommand};

use super::{get_config, output_result, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.giztoy/wav/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Write the configuration file with current values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::Show => {
                let cfg = get_config(cli)?;
                if !cli.json {
                    println!("# {}", cfg.path().display());
                }
                output_result(&cfg, cli.json)
            }

            ConfigSubcommand::Init { force } => {
                let cfg = get_config(cli)?;
                if cfg.exists() && !force {
                    anyhow::bail!(
                        "config file {} already exists, use --force to overwrite",
                        cfg.path().display()
                    );
                }
                cfg.save()?;
                print_success(&format!("Config written to {}", cfg.path().display()));
                Ok(())
            }
        }
    }
}
