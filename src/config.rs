// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs of a Julia set render.
//!
//! A `GeneratorConfig` is a plain value.  The owner mutates it through
//! the setters as often as it likes; every render works from a copy
//! taken at the moment the render is requested, so edits only ever
//! affect the *next* render.

use errors::JuliaError;

/// How an iteration count becomes an index into the colormap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coloring {
    /// `floor(1000 * i / max_iterations)`.  Produces visible bands.
    Banded,
    /// Continuous iteration count, `i + 2 - log2(log2(|z|^2))`, scaled
    /// the same way.  Removes the banding.
    Smooth,
}

impl Default for Coloring {
    fn default() -> Self {
        Coloring::Banded
    }
}

/// An immutable-per-run snapshot of everything a render needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    width: u32,
    height: u32,
    max_iterations: u32,
    c_real: f64,
    c_imag: f64,
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    coloring: Coloring,
}

/// Default output width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default per-pixel iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;
/// Default real part of the Julia constant.
pub const DEFAULT_C_REAL: f64 = -0.7;
/// Default imaginary part of the Julia constant.
pub const DEFAULT_C_IMAG: f64 = 0.27015;

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            DEFAULT_C_REAL,
            DEFAULT_C_IMAG,
            DEFAULT_MAX_ITERATIONS,
        )
    }
}

impl GeneratorConfig {
    /// A configuration with the given raster size, constant and
    /// iteration cap, unzoomed and centered on the origin.
    pub fn new(width: u32, height: u32, c_real: f64, c_imag: f64, max_iterations: u32) -> Self {
        GeneratorConfig {
            width,
            height,
            max_iterations,
            c_real,
            c_imag,
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            coloring: Coloring::Banded,
        }
    }

    /// Output width in pixels.
    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = width;
        self
    }

    /// Output height in pixels.
    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = height;
        self
    }

    /// Iteration cap per pixel.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> &mut Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Real part of the constant `c` in `z^2 + c`.
    pub fn set_c_real(&mut self, c_real: f64) -> &mut Self {
        self.c_real = c_real;
        self
    }

    /// Imaginary part of the constant `c` in `z^2 + c`.
    pub fn set_c_imag(&mut self, c_imag: f64) -> &mut Self {
        self.c_imag = c_imag;
        self
    }

    /// Half-extent multiplier of the visible window.  Larger values
    /// show *more* of the plane.
    pub fn set_zoom(&mut self, zoom: f64) -> &mut Self {
        self.zoom = zoom;
        self
    }

    /// Horizontal pan, in complex-plane units.  Added to the real axis.
    pub fn set_offset_x(&mut self, offset_x: f64) -> &mut Self {
        self.offset_x = offset_x;
        self
    }

    /// Vertical pan, in complex-plane units.  *Subtracted* from the
    /// imaginary axis.
    pub fn set_offset_y(&mut self, offset_y: f64) -> &mut Self {
        self.offset_y = offset_y;
        self
    }

    /// Selects the coloring policy.
    pub fn set_coloring(&mut self, coloring: Coloring) -> &mut Self {
        self.coloring = coloring;
        self
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iteration cap per pixel.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Real part of `c`.
    pub fn c_real(&self) -> f64 {
        self.c_real
    }

    /// Imaginary part of `c`.
    pub fn c_imag(&self) -> f64 {
        self.c_imag
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Horizontal pan.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical pan.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Current coloring policy.
    pub fn coloring(&self) -> Coloring {
        self.coloring
    }

    /// `width / height`, always derived from the current dimensions.
    /// Meaningless until `validate` has passed.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of bytes an RGB raster of this size needs, or `None` if
    /// that does not fit in memory addressing.
    pub fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(3))
    }

    /// Rejects anything that would divide by zero, allocate an empty
    /// raster, or feed non-finite values into the mapping.
    pub fn validate(&self) -> Result<(), JuliaError> {
        if self.width == 0 {
            return Err(JuliaError::invalid("width must be greater than zero"));
        }
        if self.height == 0 {
            return Err(JuliaError::invalid("height must be greater than zero"));
        }
        if self.max_iterations == 0 {
            return Err(JuliaError::invalid(
                "maximum iterations must be greater than zero",
            ));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(JuliaError::invalid(format!(
                "zoom must be a positive number, got {}",
                self.zoom
            )));
        }
        let finite = [self.c_real, self.c_imag, self.offset_x, self.offset_y];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(JuliaError::invalid(
                "the constant and the offsets must be finite",
            ));
        }
        if self.byte_len().is_none() {
            return Err(JuliaError::invalid(format!(
                "a {}x{} raster is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
