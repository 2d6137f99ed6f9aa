//! # Configuration Error Types
//!
//! Runtime classification, compositing and passability never fail. The only
//! fallible step is the one-time configuration load.

use thiserror::Error;

/// Errors raised while loading the region configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A region id setting is present but is not an integer.
    #[error("invalid value for `{key}`: {value:?} is not an integer region id")]
    Parse {
        /// The setting name.
        key: &'static str,
        /// The offending raw value.
        value: String,
    },

    /// The settings document itself is not valid TOML.
    #[error("malformed configuration document: {0}")]
    Toml(#[from] toml::de::Error),

    /// The settings file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
