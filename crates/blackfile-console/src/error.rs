//! Error types for the console binary.

/// Top-level error for the console host.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: blackfile_core::ConfigError,
    },

    /// The configured roster could not be registered.
    #[error("campaign error: {source}")]
    Campaign {
        /// The underlying campaign error.
        #[from]
        source: blackfile_core::CoreError,
    },

    /// Reading commands or writing responses failed.
    #[error("i/o error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A response could not be encoded.
    #[error("encoding error: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The log filter from configuration is invalid.
    #[error("invalid log filter '{filter}': {reason}")]
    LogFilter {
        /// The rejected filter string.
        filter: String,
        /// Why the filter was rejected.
        reason: String,
    },
}
