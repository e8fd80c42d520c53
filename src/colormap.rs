// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The "jet" colormap: dark blue through cyan, yellow and red to dark
//! red, in 1001 steps.  Built once, on first use.

use num::clamp;
use once_cell::sync::Lazy;

/// Number of entries in the colormap; valid indices are `0..=1000`.
pub const COLORMAP_LEN: usize = 1001;

/// The largest valid colormap index.
pub const MAX_COLOR_INDEX: usize = COLORMAP_LEN - 1;

/// Color used for points that never escaped.
pub const NOT_ESCAPED: [u8; 3] = [0, 0, 0];

static JET: Lazy<Vec<[u8; 3]>> = Lazy::new(|| (0..COLORMAP_LEN).map(jet_entry).collect());

fn channel(t: f64, center: f64) -> u8 {
    let v = clamp(1.5 - (4.0 * t - center).abs(), 0.0, 1.0);
    (v * 255.0).round() as u8
}

fn jet_entry(index: usize) -> [u8; 3] {
    let t = index as f64 / MAX_COLOR_INDEX as f64;
    [channel(t, 3.0), channel(t, 2.0), channel(t, 1.0)]
}

/// The whole table.
pub fn jet() -> &'static [[u8; 3]] {
    &JET
}

/// Looks up a color, saturating indices past the end of the table.
#[inline]
pub fn color(index: usize) -> [u8; 3] {
    JET[index.min(MAX_COLOR_INDEX)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_index() {
        assert_eq!(jet().len(), COLORMAP_LEN);
    }

    #[test]
    fn ends_of_the_gradient() {
        assert_eq!(color(0), [0, 0, 128]);
        assert_eq!(color(MAX_COLOR_INDEX), [128, 0, 0]);
        assert_eq!(color(500), [128, 255, 128]);
    }

    #[test]
    fn no_entry_is_black() {
        assert!(jet().iter().all(|c| *c != NOT_ESCAPED));
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(color(5000), color(MAX_COLOR_INDEX));
    }
}
