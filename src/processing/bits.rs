//! # Bit Serializer
//!
//! Expands bytes into single bits, most significant bit first, and folds them
//! back again.

/// Iterator over the bits of a byte slice, MSB first within each byte.
///
/// Each item is `0` or `1`. The iterator borrows the data and holds no other
/// state, so cloning it (or calling [`to_bits`] again) restarts the sequence.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    data: &'a [u8],
    position: usize,
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.data.get(self.position / 8)?;
        let shift = 7 - (self.position % 8);
        self.position += 1;

        Some((byte >> shift) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() * 8 - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// Serialize `data` into exactly `8 * data.len()` bits.
pub fn to_bits(data: &[u8]) -> Bits<'_> {
    Bits { data, position: 0 }
}

/// Group up to 8 bits (MSB first) into one byte.
///
/// Only the lowest bit of each input is used. Fewer than 8 bits are treated as
/// the low end of the byte.
pub fn from_bits(bits: &[u8]) -> u8 {
    debug_assert!(bits.len() <= 8);

    bits.iter().fold(0u8, |byte, bit| (byte << 1) | (bit & 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first() {
        let bits: Vec<u8> = to_bits(&[0b1000_0001, 0x30]).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_length_and_restart() {
        let data = b"Hi003";
        let bits = to_bits(data);
        assert_eq!(bits.len(), 40);

        let first: Vec<u8> = bits.clone().collect();
        let second: Vec<u8> = bits.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_bits(&[]).count(), 0);
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(from_bits(&[0, 1, 0, 0, 1, 0, 0, 0]), b'H');
        assert_eq!(from_bits(&[1, 1, 1, 1, 1, 1, 1, 1]), 0xFF);
        assert_eq!(from_bits(&[]), 0);
    }

    #[test]
    fn test_from_bits_inverts_to_bits() {
        let data = [0x00, 0x5A, 0xA5, 0xFF];
        let bits: Vec<u8> = to_bits(&data).collect();
        let bytes: Vec<u8> = bits.chunks(8).map(from_bits).collect();
        assert_eq!(bytes, data);
    }
}
