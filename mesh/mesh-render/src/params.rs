//! Parameters for preview rendering.

/// Parameters for preview rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewParams {
    /// Image width in pixels. Default: 800
    pub width: u32,

    /// Image height in pixels. Default: 600
    pub height: u32,

    /// Background colour. Default: 30% grey
    pub background: [u8; 3],

    /// Surface colour before shading. Default: white
    pub surface: [u8; 3],

    /// Light that reaches faces turned away from the headlight, in
    /// `[0, 1]`. Default: 0.15
    pub ambient: f64,

    /// Fraction of the image the mesh may span along its longer projected
    /// axis. Default: 0.9
    pub fill: f64,
}

impl Default for PreviewParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: [77, 77, 77],
            surface: [255, 255, 255],
            ambient: 0.15,
            fill: 0.9,
        }
    }
}

impl PreviewParams {
    /// Small thumbnail preset.
    #[must_use]
    pub fn thumbnail() -> Self {
        Self {
            width: 200,
            height: 150,
            ..Self::default()
        }
    }

    /// Set the image size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background colour.
    #[must_use]
    pub const fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    /// Set the surface colour.
    #[must_use]
    pub const fn with_surface(mut self, rgb: [u8; 3]) -> Self {
        self.surface = rgb;
        self
    }
}
