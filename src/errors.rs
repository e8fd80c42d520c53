// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The three ways a render can go wrong.

use failure::Fail;

/// Everything the generator and the runner can report.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum JuliaError {
    /// The configuration cannot be rendered: a zero dimension, a zero
    /// iteration budget, a non-positive zoom, or a non-finite parameter.
    /// Detected before any allocation happens.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A runner was asked to start while its previous job was still
    /// outstanding.
    #[fail(display = "a generation is already running")]
    AlreadyRunning,

    /// A background generation died unexpectedly.
    #[fail(display = "generation failed: {}", _0)]
    GenerationFailed(String),
}

impl JuliaError {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> Self {
        JuliaError::InvalidConfiguration(reason.into())
    }
}
