//! # Pixel Grid
//!
//! An owned, bounds-checked RGB buffer plus the one traversal order shared by
//! embedding and extraction.

use image::RgbImage;

use crate::common::error::{Result, StegoError};

/// One pixel with 8-bit red, green and blue channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// A `width` x `height` grid of pixels stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// Visit every coordinate of a `width` x `height` grid row-major: top row
/// first, left to right within a row.
///
/// This is the wire order of the embedding. Both the embedder and the
/// extractor walk the grid through this function and nothing else.
pub fn row_major(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

impl PixelGrid {
    /// A grid where every pixel is black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::default())
    }

    /// A grid where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![pixel; len],
        }
    }

    /// Build a grid from packed `R, G, B` bytes in row-major order.
    ///
    /// # Errors
    /// - [`StegoError::InvalidDimensions`] if `raw.len() != width * height * 3`
    pub fn from_raw(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if raw.len() != expected {
            return Err(StegoError::InvalidDimensions {
                width,
                height,
                len: raw.len(),
            });
        }

        let pixels = raw
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Pixel> {
        self.index(x, y).map(|i| &self.pixels[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        self.index(x, y).map(move |i| &mut self.pixels[i])
    }

    /// Pixels in [`row_major`] order.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        row_major(self.width, self.height).filter_map(move |(x, y)| self.get(x, y))
    }

    /// Packed `R, G, B` bytes in row-major order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.red, p.green, p.blue])
            .collect()
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| Pixel::new(p[0], p[1], p[2]))
            .collect();

        Self {
            width,
            height,
            pixels,
        }
    }
}

impl From<&PixelGrid> for RgbImage {
    fn from(grid: &PixelGrid) -> Self {
        RgbImage::from_fn(grid.width, grid.height, |x, y| {
            let p = grid.get(x, y).copied().unwrap_or_default();
            image::Rgb([p.red, p.green, p.blue])
        })
    }
}
