//! CLI commands module.

mod config;
mod convert;
mod info;
mod util;

pub use config::ConfigCommand;
pub use convert::ConvertCommand;
pub use info::InfoCommand;

pub(crate) use util::*;
