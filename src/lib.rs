//! # pixel-stego
//!
//! Hides short text messages in the blue-channel least significant bits of an
//! image, encrypted with a repeating-key XOR and delimited by a fixed
//! terminator.
//!
//! ```
//! use pixel_stego::{hide, reveal, PixelGrid};
//!
//! let mut grid = PixelGrid::new(8, 8);
//! hide(&mut grid, "Hi", "k")?;
//! assert_eq!(reveal(&grid, "k")?, "Hi");
//! # Ok::<(), pixel_stego::StegoError>(())
//! ```

pub mod common;
pub mod processing;

pub use common::error::{Result, StegoError};
pub use processing::carrier::Carrier;
pub use processing::cipher::{transform, Keystream};
pub use processing::grid::{row_major, Pixel, PixelGrid};
pub use processing::steganography::{
    capacity, embed, extract, fits, hide, max_message_len, reveal, TERMINATOR,
};
