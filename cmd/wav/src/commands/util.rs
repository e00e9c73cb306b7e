//! Utility functions for CLI commands.

use serde::Serialize;

use crate::config::{load_config, Config};
use crate::Cli;

/// Gets the configuration selected by `--config`.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: Serialize>(result: &T, as_json: bool) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    print!("{}", output);
    Ok(())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("[ok] {}", msg);
}
