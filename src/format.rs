//! Pixel formats for render-target images.
//!
//! Only formats that can be bound as a pass attachment are represented here;
//! sampling-only formats are the attachment image's concern.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8,
    Srgba8,
    Rgba16F,
    Rgba32F,
    Depth16,
    Depth24,
    Depth32F,
    Depth24Stencil8,
    Depth32FStencil8,
    Stencil8,
}

impl PixelFormat {
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            Self::Depth16
                | Self::Depth24
                | Self::Depth32F
                | Self::Depth24Stencil8
                | Self::Depth32FStencil8
        )
    }

    pub fn is_stencil(self) -> bool {
        matches!(
            self,
            Self::Stencil8 | Self::Depth24Stencil8 | Self::Depth32FStencil8
        )
    }

    /// Whether this format may occupy the depth/stencil attachment slot.
    pub fn is_depth_stencil(self) -> bool {
        self.is_depth() || self.is_stencil()
    }

    pub fn is_srgb(self) -> bool {
        matches!(self, Self::Srgba8)
    }
}
