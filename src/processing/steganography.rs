//! # LSB Steganography Implementation
//!
//! Hides a password-encrypted text message in the least significant bit of
//! each pixel's blue channel.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. XOR the message bytes with the repeating password ([`Keystream`])
//! 2. Append the 3-byte [`TERMINATOR`]
//! 3. Serialize the result into bits, MSB first per byte
//! 4. Walk the pixels row-major and write one bit into each blue LSB
//!
//! ### Decoding Process
//! 1. Walk the pixels in the same order, collecting blue LSBs
//! 2. Group every 8 bits into a byte
//! 3. Stop as soon as the last 3 bytes equal the terminator
//! 4. Drop the terminator, XOR with the password, decode as UTF-8
//!
//! ### Capacity
//! One bit per pixel, so a `width x height` image carries `width * height`
//! bits, of which 24 go to the terminator.
//!
//! ## Limitations
//!
//! The payload is delimited by a sentinel rather than a length prefix, so a
//! ciphertext that itself contains the terminator bytes cannot be recovered.
//! [`hide`] refuses such payloads with [`StegoError::TerminatorCollision`]
//! instead of writing something that would extract truncated.

use crate::common::error::{Result, StegoError};
use crate::processing::bits::{from_bits, to_bits};
use crate::processing::cipher::Keystream;
use crate::processing::grid::{row_major, PixelGrid};

/// Marker appended after the ciphertext: ASCII `"003"`.
pub const TERMINATOR: [u8; 3] = *b"003";

/// Number of payload bits `grid` can carry (one per pixel).
pub fn capacity(grid: &PixelGrid) -> usize {
    grid.len()
}

/// Bits required to hide a message of `message_len` bytes, terminator included.
pub fn required_bits(message_len: usize) -> usize {
    message_len.saturating_add(TERMINATOR.len()).saturating_mul(8)
}

/// Whether a message of `message_len` bytes fits in `grid`.
pub fn fits(grid: &PixelGrid, message_len: usize) -> bool {
    required_bits(message_len) <= capacity(grid)
}

/// Longest message, in bytes, that fits in `grid`.
///
/// `None` if the grid cannot even hold the terminator.
pub fn max_message_len(grid: &PixelGrid) -> Option<usize> {
    (capacity(grid) / 8).checked_sub(TERMINATOR.len())
}

/// Write `bits` into the blue-channel LSBs of `grid`, row-major.
///
/// Only the lowest bit of each item is used. Red, green and the upper seven
/// blue bits are preserved. Pixels past the end of `bits` are left untouched,
/// and bits past the end of the grid are dropped; check [`fits`] first.
pub fn embed<I>(grid: &mut PixelGrid, bits: I)
where
    I: IntoIterator<Item = u8>,
{
    for ((x, y), bit) in row_major(grid.width(), grid.height()).zip(bits) {
        if let Some(pixel) = grid.get_mut(x, y) {
            pixel.blue = (pixel.blue & 0xFE) | (bit & 1);
        }
    }
}

/// Where an [`Extractor`] is after consuming a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Collecting bits for the next byte; holds how many are pending (0..=7).
    Accumulating(usize),
    /// The terminator has just been assembled.
    Done,
}

/// Incremental decoder that turns a stream of bits into terminated payload bytes.
#[derive(Debug, Default)]
pub struct Extractor {
    pending: Vec<u8>,
    bytes: Vec<u8>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next bit. After the 8th bit of a byte the byte is assembled
    /// and the last three bytes are compared to the terminator.
    pub fn push_bit(&mut self, bit: u8) -> ScanState {
        self.pending.push(bit & 1);
        if self.pending.len() < 8 {
            return ScanState::Accumulating(self.pending.len());
        }

        self.bytes.push(from_bits(&self.pending));
        self.pending.clear();

        if self.bytes.ends_with(&TERMINATOR) {
            ScanState::Done
        } else {
            ScanState::Accumulating(0)
        }
    }

    /// Bytes assembled so far, terminator included if it was reached.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The payload with the terminator removed.
    ///
    /// # Errors
    /// - [`StegoError::TerminatorNotFound`] if the terminator was never assembled
    pub fn into_payload(mut self) -> Result<Vec<u8>> {
        if !self.bytes.ends_with(&TERMINATOR) {
            return Err(StegoError::TerminatorNotFound);
        }

        self.bytes.truncate(self.bytes.len() - TERMINATOR.len());
        Ok(self.bytes)
    }
}

/// Read blue-channel LSBs row-major until the terminator, returning the bytes before it.
///
/// # Errors
/// - [`StegoError::TerminatorNotFound`] if the image ends first
pub fn extract(grid: &PixelGrid) -> Result<Vec<u8>> {
    let mut extractor = Extractor::new();

    for pixel in grid.pixels() {
        if extractor.push_bit(pixel.blue & 1) == ScanState::Done {
            break;
        }
    }

    extractor.into_payload()
}

/// Encrypt `message` with `password` and embed it in `grid` in place.
///
/// Callers that need the original pixels must clone the grid first. On error
/// the grid is left untouched.
///
/// # Errors
/// - [`StegoError::EmptyKey`] if `password` is empty
/// - [`StegoError::CapacityExceeded`] if the message plus terminator does not fit
/// - [`StegoError::TerminatorCollision`] if the ciphertext contains the terminator
///
/// # Example
/// ```
/// use pixel_stego::{hide, reveal, PixelGrid};
///
/// let mut grid = PixelGrid::new(8, 8);
/// hide(&mut grid, "Hi", "k").unwrap();
/// assert_eq!(reveal(&grid, "k").unwrap(), "Hi");
/// ```
pub fn hide(grid: &mut PixelGrid, message: &str, password: &str) -> Result<()> {
    let keystream = Keystream::new(password.as_bytes())?;

    let needed_bits = required_bits(message.len());
    let capacity_bits = capacity(grid);
    if needed_bits > capacity_bits {
        return Err(StegoError::CapacityExceeded {
            needed_bits,
            capacity_bits,
        });
    }

    let mut payload = keystream.apply(message.as_bytes());
    if payload.windows(TERMINATOR.len()).any(|w| w == TERMINATOR) {
        return Err(StegoError::TerminatorCollision);
    }
    payload.extend_from_slice(&TERMINATOR);

    embed(grid, to_bits(&payload));
    Ok(())
}

/// Extract and decrypt the message hidden in `grid`.
///
/// # Errors
/// - [`StegoError::EmptyKey`] if `password` is empty
/// - [`StegoError::TerminatorNotFound`] if no terminated payload is present
/// - [`StegoError::InvalidUtf8`] if the decrypted bytes are not UTF-8
pub fn reveal(grid: &PixelGrid, password: &str) -> Result<String> {
    let keystream = Keystream::new(password.as_bytes())?;
    let ciphertext = extract(grid)?;

    Ok(String::from_utf8(keystream.apply(&ciphertext))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::grid::Pixel;

    #[test]
    fn test_hi_does_not_fit_4x4() {
        let mut grid = PixelGrid::new(4, 4);
        let err = hide(&mut grid, "Hi", "k").unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                needed_bits: 40,
                capacity_bits: 16
            }
        ));
        assert_eq!(grid, PixelGrid::new(4, 4));
    }

    #[test]
    fn test_hi_round_trip_8x8() {
        let mut grid = PixelGrid::new(8, 8);
        hide(&mut grid, "Hi", "k").unwrap();
        assert_eq!(reveal(&grid, "k").unwrap(), "Hi");
    }

    #[test]
    fn test_embedded_bits_match_wire_format() {
        let mut grid = PixelGrid::new(8, 8);
        hide(&mut grid, "Hi", "k").unwrap();

        let mut expected = vec![b'H' ^ b'k', b'i' ^ b'k'];
        expected.extend_from_slice(b"003");
        let expected_bits: Vec<u8> = to_bits(&expected).collect();

        let written: Vec<u8> = grid.pixels().take(40).map(|p| p.blue & 1).collect();
        assert_eq!(written, expected_bits);
    }

    #[test]
    fn test_capacity_boundary() {
        // 2-byte message needs exactly 40 bits
        let mut exact = PixelGrid::new(8, 5);
        assert!(fits(&exact, 2));
        hide(&mut exact, "ab", "pw").unwrap();
        assert_eq!(reveal(&exact, "pw").unwrap(), "ab");

        let mut short = PixelGrid::new(13, 3);
        assert!(!fits(&short, 2));
        assert!(matches!(
            hide(&mut short, "ab", "pw"),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_max_message_len() {
        assert_eq!(max_message_len(&PixelGrid::new(8, 8)), Some(5));
        assert_eq!(max_message_len(&PixelGrid::new(4, 4)), None);
        assert_eq!(max_message_len(&PixelGrid::new(0, 0)), None);
    }

    #[test]
    fn test_empty_key_leaves_grid_untouched() {
        let original = PixelGrid::filled(8, 8, Pixel::new(1, 2, 3));
        let mut grid = original.clone();
        assert!(matches!(hide(&mut grid, "Hi", ""), Err(StegoError::EmptyKey)));
        assert_eq!(grid, original);

        assert!(matches!(reveal(&grid, ""), Err(StegoError::EmptyKey)));
    }

    #[test]
    fn test_embed_only_touches_blue_lsb() {
        let original = PixelGrid::filled(10, 10, Pixel::new(200, 150, 0xAB));
        let mut grid = original.clone();
        hide(&mut grid, "Hello", "secret").unwrap();

        for (before, after) in original.pixels().zip(grid.pixels()) {
            assert_eq!(before.red, after.red);
            assert_eq!(before.green, after.green);
            assert_eq!(before.blue & 0xFE, after.blue & 0xFE);
        }
    }

    #[test]
    fn test_embed_locality() {
        let original = PixelGrid::filled(10, 10, Pixel::new(7, 8, 9));
        let mut grid = original.clone();
        hide(&mut grid, "Hello", "secret").unwrap();

        let used = required_bits(5);
        let unchanged = original
            .pixels()
            .zip(grid.pixels())
            .skip(used)
            .all(|(a, b)| a == b);
        assert!(unchanged);
    }

    #[test]
    fn test_column_major_read_breaks_round_trip() {
        let mut grid = PixelGrid::new(8, 8);
        hide(&mut grid, "Hi", "k").unwrap();

        let mut extractor = Extractor::new();
        let mut done = false;
        'outer: for x in 0..grid.width() {
            for y in 0..grid.height() {
                let bit = grid.get(x, y).map(|p| p.blue & 1).unwrap_or(0);
                if extractor.push_bit(bit) == ScanState::Done {
                    done = true;
                    break 'outer;
                }
            }
        }

        assert!(!done);
        assert!(matches!(
            extractor.into_payload(),
            Err(StegoError::TerminatorNotFound)
        ));
    }

    #[test]
    fn test_terminator_not_found() {
        let grid = PixelGrid::new(16, 16);
        assert!(matches!(extract(&grid), Err(StegoError::TerminatorNotFound)));
        assert!(matches!(
            reveal(&grid, "k"),
            Err(StegoError::TerminatorNotFound)
        ));
    }

    #[test]
    fn test_terminator_collision_rejected() {
        // "[[X" XOR "k" == "003"
        let message = "[[X";
        assert_eq!(
            Keystream::new(b"k").unwrap().apply(message.as_bytes()),
            TERMINATOR
        );

        let mut grid = PixelGrid::new(16, 16);
        assert!(matches!(
            hide(&mut grid, message, "k"),
            Err(StegoError::TerminatorCollision)
        ));
        assert_eq!(grid, PixelGrid::new(16, 16));
    }

    #[test]
    fn test_empty_message() {
        let mut grid = PixelGrid::new(5, 5);
        hide(&mut grid, "", "k").unwrap();
        assert_eq!(extract(&grid).unwrap(), Vec::<u8>::new());
        assert_eq!(reveal(&grid, "k").unwrap(), "");
    }

    #[test]
    fn test_extract_stops_at_first_terminator() {
        let mut grid = PixelGrid::new(16, 16);
        embed(&mut grid, to_bits(b"ab003cd003"));
        assert_eq!(extract(&grid).unwrap(), b"ab");
    }

    #[test]
    fn test_extractor_states() {
        let mut extractor = Extractor::new();
        let bits: Vec<u8> = to_bits(b"0").collect();
        for (i, bit) in bits.iter().take(7).enumerate() {
            assert_eq!(extractor.push_bit(*bit), ScanState::Accumulating(i + 1));
        }
        assert_eq!(extractor.push_bit(bits[7]), ScanState::Accumulating(0));
        assert_eq!(extractor.bytes(), b"0");

        for bit in to_bits(b"03") {
            extractor.push_bit(bit);
        }
        assert_eq!(extractor.bytes(), b"003");
        assert_eq!(extractor.into_payload().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_multibyte_utf8() {
        let mut grid = PixelGrid::new(32, 32);
        hide(&mut grid, "héllo ✓", "clé").unwrap();
        assert_eq!(reveal(&grid, "clé").unwrap(), "héllo ✓");
    }
}
