//! # Error Types
//!
//! Every failure the hide/reveal pipeline can produce. Errors are returned to
//! the caller and never retried; formatting them for a user is the job of the
//! command-line layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while hiding or revealing a message.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The message plus terminator does not fit in the carrier.
    #[error("Image too small for this text: need {needed_bits} bits but only have {capacity_bits} bits available")]
    CapacityExceeded {
        needed_bits: usize,
        capacity_bits: usize,
    },

    /// A zero-length password was supplied.
    #[error("Password must not be empty")]
    EmptyKey,

    /// The carrier image could not be found.
    #[error("Carrier image not found: {}", .path.display())]
    MissingCarrier { path: PathBuf },

    /// The whole image was scanned without meeting the terminator.
    #[error("No hidden message found: reached end of image without a terminator")]
    TerminatorNotFound,

    /// The encrypted message contains the terminator bytes and would be cut short on extraction.
    #[error("Encrypted message contains the terminator sequence; try a different password")]
    TerminatorCollision,

    /// The recovered bytes are not valid UTF-8 (usually a wrong password).
    #[error("Recovered message is not valid UTF-8 (wrong password?)")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Grid construction from raw bytes with a mismatched length.
    #[error("Pixel buffer of {len} bytes does not match a {width}x{height} RGB grid")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegoError>;
