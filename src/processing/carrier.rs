//! # Carrier Images
//!
//! Loads images from disk or memory into a [`PixelGrid`] and writes them back
//! as PNG. Alpha, if the source had any, is kept aside and restored on save so
//! that transparent carriers survive a hide.
//!
//! Output is always PNG: a lossy format would destroy the LSBs.

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

use crate::common::error::{Result, StegoError};
use crate::processing::grid::PixelGrid;

/// A decoded image: the RGB grid the core works on, plus optional alpha.
#[derive(Debug, Clone)]
pub struct Carrier {
    grid: PixelGrid,
    alpha: Option<Vec<u8>>,
}

impl Carrier {
    /// Decode an image file.
    ///
    /// # Errors
    /// - [`StegoError::MissingCarrier`] if `path` does not exist
    /// - [`StegoError::Image`] if the file cannot be decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StegoError::MissingCarrier {
                path: path.to_path_buf(),
            });
        }

        let carrier = Self::from_image(image::open(path)?);
        debug!(
            "Loaded carrier {} ({}x{})",
            path.display(),
            carrier.grid.width(),
            carrier.grid.height()
        );
        Ok(carrier)
    }

    /// Decode an image held in memory (any format supported by the `image` crate).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_image(image::load_from_memory(bytes)?))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let alpha = rgba.pixels().map(|p| p[3]).collect();
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

            Self {
                grid: PixelGrid::from(&rgb),
                alpha: Some(alpha),
            }
        } else {
            Self::from(PixelGrid::from(&image.to_rgb8()))
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Rebuild an image from the (possibly modified) grid.
    pub fn to_image(&self) -> DynamicImage {
        let rgb = RgbImage::from(&self.grid);

        match &self.alpha {
            Some(alpha) => {
                let rgba = RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                    let [r, g, b] = rgb.get_pixel(x, y).0;
                    let i = y as usize * rgb.width() as usize + x as usize;
                    image::Rgba([r, g, b, alpha.get(i).copied().unwrap_or(u8::MAX)])
                });
                DynamicImage::ImageRgba8(rgba)
            }
            None => DynamicImage::ImageRgb8(rgb),
        }
    }

    /// Write the carrier to `path` as PNG, whatever its extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        debug!("Saved carrier to {}", path.display());
        Ok(())
    }

    /// Encode the carrier as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut output_bytes = Vec::new();
        self.to_image()
            .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
        Ok(output_bytes)
    }
}

impl From<PixelGrid> for Carrier {
    fn from(grid: PixelGrid) -> Self {
        Self { grid, alpha: None }
    }
}
