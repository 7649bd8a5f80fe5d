//! # Image Processing and Steganography
//!
//! The hide/reveal core and the image I/O around it.
//!
//! - [`cipher`]: repeating-key XOR
//! - [`bits`]: MSB-first bit serialization
//! - [`grid`]: the pixel buffer and its canonical scan order
//! - [`steganography`]: terminator, capacity, embed and extract
//! - [`carrier`]: decoding and encoding image files

pub mod bits;
pub mod carrier;
pub mod cipher;
pub mod grid;
pub mod steganography;

// Re-export main functions for convenience
pub use steganography::{embed, extract, hide, reveal};
