// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper left, and a window on the complex plane centered on the
//! origin, stretched by the aspect ratio, scaled by the zoom and moved
//! by the offsets.
//!
//! The mapping is fixed:
//!
//! ```text
//! re(x) = aspect * 2 * ((2x) / width  - 1) * zoom + offset_x
//! im(y) =          2 * ((2y) / height - 1) * zoom - offset_y
//! ```
//!
//! Note that `zoom` grows the window (it is an inverse zoom) and that
//! `offset_y` is subtracted.  Both conventions are relied upon by
//! anything that positions the view, so they stay as they are.

use num::Complex;

use config::GeneratorConfig;
use errors::JuliaError;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub u32, pub u32);

/// Describes the x, y of a pixel, column first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// The extent of the visible complex window, as seen at pixel column
/// 0 and `width`, and pixel row 0 and `height`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexBoundary {
    /// Real part at column 0.
    pub real_min: f64,
    /// Real part at column `width`.
    pub real_max: f64,
    /// Imaginary part at row 0 (the top row).
    pub imag_min: f64,
    /// Imaginary part at row `height`.
    pub imag_max: f64,
}

/// Maps pixels of a raster onto the complex plane.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// Size of the raster.
    pub integral_plane: IntegralPlane,
    aspect: f64,
    zoom: f64,
    offset: Complex<f64>,
}

impl PlaneMapper {
    /// Builds the mapper for a configuration, refusing any
    /// configuration that does not validate.
    pub fn new(config: &GeneratorConfig) -> Result<PlaneMapper, JuliaError> {
        config.validate()?;
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(config.width(), config.height()),
            aspect: config.aspect(),
            zoom: config.zoom(),
            offset: Complex::new(config.offset_x(), config.offset_y()),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 as usize * self.integral_plane.1 as usize
    }

    /// Describes that the integral plane is of a size.  A validated
    /// mapper never is.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Real part for a (possibly fractional, possibly out of range)
    /// column.
    #[inline]
    pub fn re(&self, x: f64) -> f64 {
        self.aspect * 2.0 * ((2.0 * x) / f64::from(self.integral_plane.0) - 1.0) * self.zoom
            + self.offset.re
    }

    /// Imaginary part for a (possibly fractional, possibly out of
    /// range) row.
    #[inline]
    pub fn im(&self, y: f64) -> f64 {
        2.0 * ((2.0 * y) / f64::from(self.integral_plane.1) - 1.0) * self.zoom - self.offset.im
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// on the complex plane iteration starts from.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.re(f64::from(pixel.0)), self.im(f64::from(pixel.1)))
    }

    /// The visible window, evaluated at the raster edges.
    pub fn boundary(&self) -> ComplexBoundary {
        ComplexBoundary {
            real_min: self.re(0.0),
            real_max: self.re(f64::from(self.integral_plane.0)),
            imag_min: self.im(0.0),
            imag_max: self.im(f64::from(self.integral_plane.1)),
        }
    }
}

/// The visible complex window for a configuration.
pub fn complex_plane_boundary(config: &GeneratorConfig) -> Result<ComplexBoundary, JuliaError> {
    PlaneMapper::new(config).map(|plane| plane.boundary())
}
