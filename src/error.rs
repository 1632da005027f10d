use std::io;
use thiserror::Error;

/// Result type for icon resolution operations
pub type IconResult<T> = Result<T, IconError>;

/// Error types for icon set loading and resolution.
///
/// "Icon not found" is deliberately not an error: lookups that miss every
/// source return `None`. Errors are reserved for data sources that exist
/// but cannot be read or parsed.
#[derive(Error, Debug)]
pub enum IconError {
    /// Failure reading a vendored file or bundled archive
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A dataset file exists but is not valid Iconify JSON. Distinct from
    /// an absent file, which is a normal not-found case.
    #[error("Malformed icon set '{prefix}': {source}")]
    MalformedDataset {
        /// Prefix of the icon set whose file failed to parse
        prefix: String,
        /// Underlying JSON parse error
        source: serde_json::Error,
    },
}
