//! Error types for hexitch.
//!
//! Only failures that end a session live here. Out-of-range navigation is
//! clamped and undecodable bytes become placeholder rows, so neither of them
//! ever reaches this type.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hexitch operations.
#[derive(Debug, Error)]
pub enum HexitchError {
    /// The backing file could not be opened or probed
    #[error("cannot open {}: {source}", path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read failed for a reason other than end-of-file
    #[error("read failed at {address:#010x}: {source}")]
    Read {
        address: u64,
        #[source]
        source: std::io::Error,
    },

    /// Terminal I/O errors
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Bad command line
    #[error("{0}")]
    Usage(String),

    /// Text that does not parse as an address
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// Decoder bitness other than 16, 32 or 64
    #[error("unsupported bitness: {0}")]
    UnsupportedBitness(u32),
}

/// Result type alias for hexitch operations
pub type Result<T> = std::result::Result<T, HexitchError>;
