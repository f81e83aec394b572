//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid command-line configuration.
///
/// Any of these stops the process before the watcher or server starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing markdown file argument")]
    MissingFile,

    #[error("invalid port number: {0}. Valid range is 1-65535")]
    InvalidPort(i64),

    #[error("invalid address: {0}. Please give a valid ip, 'localhost' or 'any'")]
    InvalidAddress(String),

    #[error("directory `{}` does not exist", .0.display())]
    MissingDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let port = ConfigError::InvalidPort(99999);
        assert_eq!(
            port.to_string(),
            "invalid port number: 99999. Valid range is 1-65535"
        );

        let address = ConfigError::InvalidAddress("999.1.1.1".into());
        let display = address.to_string();
        assert!(display.contains("999.1.1.1"));
        assert!(display.contains("'localhost' or 'any'"));

        let dir = ConfigError::MissingDirectory(PathBuf::from("/no/such/dir"));
        assert!(dir.to_string().contains("/no/such/dir"));
    }
}
