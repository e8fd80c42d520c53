// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rendered image: 8-bit RGB, row-major, top row first, no alpha.

use image::RgbImage;

/// A finished render.  Never modified after the generator hands it
/// over, so it can be shared freely behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 3);
        PixelBuffer {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (not bytes).
    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    /// True only for a zero-area buffer, which the generator never
    /// produces.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The color at column `x`, row `y`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Iterates the pixels in row-major order.
    pub fn pixels<'a>(&'a self) -> impl Iterator<Item = [u8; 3]> + 'a {
        self.data.chunks(3).map(|p| [p[0], p[1], p[2]])
    }

    /// The raw RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Converts into an `image` buffer for encoding.
    pub fn into_image(self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data)
    }
}
