// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! Every pixel is mapped to a point `z0` on the complex plane, and
//! `z -> z^2 + c` is applied repeatedly until `|z|^2` reaches 4 or the
//! iteration budget runs out.  The iteration at which the point
//! escaped picks a color out of the jet colormap; points that never
//! escape are painted black.
//!
//! The cost is `width * height * max_iterations` in the worst case, and
//! the interior of the set always pays the full budget.  Nothing in
//! here bounds that; large renders belong on a background `Runner`.

use itertools::iproduct;
use num::{clamp, Complex};

use buffer::PixelBuffer;
use colormap::{self, MAX_COLOR_INDEX, NOT_ESCAPED};
use config::{Coloring, GeneratorConfig};
use errors::JuliaError;
use planes::{IntegralPlane, Pixel, PlaneMapper};

/// What happened to one starting point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Escape {
    /// Crossed the escape radius during `iteration`.  `norm_sqr` is the
    /// squared magnitude that crossed it.
    Escaped {
        /// Zero-based iteration at which the test first succeeded.
        iteration: u32,
        /// `|z|^2` at the moment of escape.
        norm_sqr: f64,
    },
    /// Still inside the radius after the whole budget.
    Bounded,
}

impl Escape {
    /// The iteration count, with `Bounded` reported as the cap itself.
    pub fn iterations(&self, max_iterations: u32) -> u32 {
        match *self {
            Escape::Escaped { iteration, .. } => iteration,
            Escape::Bounded => max_iterations,
        }
    }

    /// True when the point left the radius.
    pub fn escaped(&self) -> bool {
        match *self {
            Escape::Escaped { .. } => true,
            Escape::Bounded => false,
        }
    }
}

/// The classic escape-time loop.  The radius test is made against the
/// squares of the *previous* `z`, after `z` has already been advanced;
/// this decides which iteration a point is credited with, and so where
/// the color bands fall.
#[inline]
pub fn escape_time(z0: Complex<f64>, c: Complex<f64>, max_iterations: u32) -> Escape {
    let (mut re, mut im) = (z0.re, z0.im);
    for i in 0..max_iterations {
        let r2 = re * re;
        let i2 = im * im;
        im = 2.0 * re * im + c.im;
        re = r2 - i2 + c.re;
        if r2 + i2 >= 4.0 {
            return Escape::Escaped {
                iteration: i,
                norm_sqr: r2 + i2,
            };
        }
    }
    Escape::Bounded
}

/// Position in the colormap for an escaped point; `None` for a point
/// that never escaped.
pub fn color_index(escape: Escape, max_iterations: u32, coloring: Coloring) -> Option<usize> {
    match escape {
        Escape::Bounded => None,
        Escape::Escaped {
            iteration,
            norm_sqr,
        } => Some(match coloring {
            Coloring::Banded => {
                let index = 1000 * u64::from(iteration) / u64::from(max_iterations);
                (index as usize).min(MAX_COLOR_INDEX)
            }
            Coloring::Smooth => {
                let it = f64::from(iteration) + 2.0 - norm_sqr.log2().log2();
                let index = (1000.0 * it / f64::from(max_iterations)).floor();
                clamp(index, 0.0, MAX_COLOR_INDEX as f64) as usize
            }
        }),
    }
}

/// Holds one validated configuration and renders it.  Once built, it
/// should not be mutable; build a new one for new parameters.
#[derive(Debug, Clone)]
pub struct JuliaRenderer {
    plane: PlaneMapper,
    c: Complex<f64>,
    max_iterations: u32,
    coloring: Coloring,
}

impl JuliaRenderer {
    /// Validates the configuration and prepares the plane mapping.
    pub fn new(config: &GeneratorConfig) -> Result<Self, JuliaError> {
        let plane = PlaneMapper::new(config)?;
        Ok(JuliaRenderer {
            plane,
            c: Complex::new(config.c_real(), config.c_imag()),
            max_iterations: config.max_iterations(),
            coloring: config.coloring(),
        })
    }

    /// The plane mapping this renderer uses.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Runs the escape loop for a single pixel.
    pub fn escape_at(&self, pixel: &Pixel) -> Escape {
        escape_time(self.plane.pixel_to_point(pixel), self.c, self.max_iterations)
    }

    /// Renders the whole raster, row by row from the top.
    pub fn render(&self) -> PixelBuffer {
        let IntegralPlane(width, height) = self.plane.integral_plane;
        let mut data = Vec::with_capacity(self.plane.len() * 3);
        for (row, column) in iproduct!(0..height, 0..width) {
            let escape = self.escape_at(&Pixel(column, row));
            let rgb = match color_index(escape, self.max_iterations, self.coloring) {
                Some(index) => colormap::color(index),
                None => NOT_ESCAPED,
            };
            data.extend_from_slice(&rgb);
        }
        PixelBuffer::from_raw(width, height, data)
    }
}

/// Renders a configuration synchronously.  Fails before allocating
/// anything if the configuration does not validate.
pub fn generate(config: &GeneratorConfig) -> Result<PixelBuffer, JuliaError> {
    JuliaRenderer::new(config).map(|renderer| renderer.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Complex<f64> = Complex {
        re: -0.7,
        im: 0.27015,
    };

    #[test]
    fn far_points_escape_immediately() {
        match escape_time(Complex::new(-2.0, -2.0), C, 50) {
            Escape::Escaped {
                iteration,
                norm_sqr,
            } => {
                assert_eq!(iteration, 0);
                assert_eq!(norm_sqr, 8.0);
            }
            Escape::Bounded => panic!("(-2, -2) cannot stay bounded"),
        }
    }

    #[test]
    fn escape_is_credited_to_the_previous_z() {
        // z0 = -1 - i has |z0|^2 = 2.  One step gives -0.7 + 2.27015i,
        // whose squares first cross the radius on iteration 1.
        let escape = escape_time(Complex::new(-1.0, -1.0), C, 50);
        assert_eq!(escape.iterations(50), 1);
    }

    #[test]
    fn the_origin_of_c_zero_never_escapes() {
        let escape = escape_time(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0), 1000);
        assert_eq!(escape, Escape::Bounded);
        assert_eq!(escape.iterations(1000), 1000);
        assert!(!escape.escaped());
    }

    #[test]
    fn banded_index_scales_to_the_table() {
        let escape = Escape::Escaped {
            iteration: 1,
            norm_sqr: 5.0,
        };
        assert_eq!(color_index(escape, 50, Coloring::Banded), Some(20));
        let escape = Escape::Escaped {
            iteration: 49,
            norm_sqr: 5.0,
        };
        assert_eq!(color_index(escape, 50, Coloring::Banded), Some(980));
        assert_eq!(color_index(Escape::Bounded, 50, Coloring::Banded), None);
    }

    #[test]
    fn smooth_index_stays_in_range() {
        let escape = Escape::Escaped {
            iteration: 0,
            norm_sqr: 1.0e300,
        };
        assert_eq!(color_index(escape, 50, Coloring::Smooth), Some(0));
        // log2(log2(4)) = 1, so it = 10 + 2 - 1 = 11.
        let escape = Escape::Escaped {
            iteration: 10,
            norm_sqr: 4.0,
        };
        assert_eq!(color_index(escape, 100, Coloring::Smooth), Some(110));
    }

    #[test]
    fn smooth_coloring_does_not_change_what_escapes() {
        let mut config = GeneratorConfig::new(24, 16, -0.7, 0.27015, 80);
        let banded = generate(&config).unwrap();
        config.set_coloring(Coloring::Smooth);
        let smooth = generate(&config).unwrap();
        for (b, s) in banded.pixels().zip(smooth.pixels()) {
            assert_eq!(b == NOT_ESCAPED, s == NOT_ESCAPED);
        }
    }

    #[test]
    fn renders_the_requested_size() {
        let config = GeneratorConfig::new(7, 3, -0.7, 0.27015, 30);
        let image = generate(&config).unwrap();
        assert_eq!(image.width(), 7);
        assert_eq!(image.height(), 3);
        assert_eq!(image.len(), 21);
        assert_eq!(image.as_bytes().len(), 63);
    }

    #[test]
    fn rejects_zero_width() {
        let mut config = GeneratorConfig::default();
        config.set_width(0);
        match generate(&config) {
            Err(JuliaError::InvalidConfiguration(_)) => {}
            other => panic!("expected an invalid configuration, got {:?}", other),
        }
    }
}
