#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! A Julia set is the boundary between the points of the complex
//! plane that stay bounded under repeated application of `z^2 + c`
//! and those that fly off to infinity, for some fixed constant `c`.
//! Each pixel of the output is mapped to a starting point; the number
//! of iterations it takes that point to leave a circle of radius 2 is
//! its "velocity," and picks its color.  Points that never leave are
//! black.
//!
//! Rendering is synchronous through [`generate`], or runs off the
//! calling thread through a [`Runner`], which accepts one job at a
//! time and reports the finished image and its render time to a
//! listener.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate once_cell;

pub mod buffer;
pub mod colormap;
pub mod config;
pub mod errors;
pub mod generator;
pub mod planes;
pub mod runner;

pub use buffer::PixelBuffer;
pub use config::{Coloring, GeneratorConfig};
pub use errors::JuliaError;
pub use generator::{escape_time, generate, Escape, JuliaRenderer};
pub use planes::{complex_plane_boundary, ComplexBoundary};
pub use runner::{Outcome, Rendered, Runner};
