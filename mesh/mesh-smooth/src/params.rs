//! Parameters for Laplacian smoothing.

use crate::error::{SmoothError, SmoothResult};

/// Parameters for Laplacian smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothParams {
    /// Number of relaxation passes. Default: 100
    pub iterations: u32,

    /// Fraction of the way each vertex moves toward its neighbour mean per
    /// pass, in `[0, 1]`. Default: 0.01
    pub relaxation: f64,

    /// Keep vertices on open boundary edges fixed. Default: false
    pub preserve_boundaries: bool,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            relaxation: 0.01,
            preserve_boundaries: false,
        }
    }
}

impl SmoothParams {
    /// Params that leave the mesh untouched.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            iterations: 0,
            ..Self::default()
        }
    }

    /// Stronger relaxation for coarse, decimated surfaces.
    #[must_use]
    pub fn strong() -> Self {
        Self {
            iterations: 50,
            relaxation: 0.3,
            ..Self::default()
        }
    }

    /// Set the number of passes.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the relaxation factor.
    #[must_use]
    pub const fn with_relaxation(mut self, relaxation: f64) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Set whether open boundaries are pinned.
    #[must_use]
    pub const fn with_preserve_boundaries(mut self, preserve: bool) -> Self {
        self.preserve_boundaries = preserve;
        self
    }

    /// Check that the relaxation factor lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SmoothError::InvalidParameter`] otherwise.
    pub fn validate(&self) -> SmoothResult<()> {
        if !(0.0..=1.0).contains(&self.relaxation) {
            return Err(SmoothError::InvalidParameter {
                name: "relaxation",
                reason: format!("{} is outside [0, 1]", self.relaxation),
            });
        }
        Ok(())
    }
}
