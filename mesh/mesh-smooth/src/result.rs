//! Smoothing outcome.

/// Summary of a smoothing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothReport {
    /// Number of passes performed.
    pub iterations: u32,

    /// Largest single-pass displacement of any vertex.
    pub max_displacement: f64,

    /// Vertices held in place as boundary vertices.
    pub pinned_vertices: usize,
}

impl SmoothReport {
    /// Whether any vertex moved.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.max_displacement > 0.0
    }
}

impl std::fmt::Display for SmoothReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Smoothing: {} passes, max displacement {:.4}, {} pinned",
            self.iterations, self.max_displacement, self.pinned_vertices
        )
    }
}
