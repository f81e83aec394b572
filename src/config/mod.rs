//! Preview configuration.
//!
//! Built once from CLI arguments and validated before anything starts.
//! Components receive the parts they need by value.
//!
//! - `address` - bind address keywords and [`ServerConfig`]
//! - `target` - the watched file ([`WatchTarget`])
//! - `error` - [`ConfigError`]

mod address;
mod error;
mod target;

pub use address::{BindAddress, DEFAULT_ADDRESS, DEFAULT_PORT, ServerConfig};
pub use error::ConfigError;
pub use target::WatchTarget;

use crate::cli::Cli;

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub target: WatchTarget,
    pub server: ServerConfig,
}

impl PreviewConfig {
    /// Validate CLI arguments.
    ///
    /// Order of checks: file argument, port, address, file directory.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli.file.as_deref().ok_or(ConfigError::MissingFile)?;
        if file.as_os_str().is_empty() {
            return Err(ConfigError::MissingFile);
        }
        let server = ServerConfig::parse(&cli.address, cli.port)?;
        let target = WatchTarget::new(file)?;
        Ok(Self { target, server })
    }
}
