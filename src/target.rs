//! Render-target sets: which images a pass renders into and what happens to
//! their contents at the pass boundaries.

use std::sync::Arc;

use bitflags::bitflags;
use thiserror::Error;

use crate::backend::Capabilities;
use crate::color::Color;
use crate::format::PixelFormat;
use crate::resources::Texture;

/// Maximum number of simultaneous color attachments a setup may carry.
pub const MAX_COLOR_TARGETS: usize = 8;

/// What happens to an attachment's contents when the pass begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeginAction {
    /// Preserve the existing contents.
    Load,
    /// Clear to the attachment's clear value.
    Clear,
    /// Contents are undefined at pass start.
    Discard,
}

/// What happens to an attachment's contents when the pass ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndAction {
    Store,
    Discard,
}

bitflags! {
    /// Request synthesis of a temporary depth and/or stencil attachment when
    /// none was supplied explicitly.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
    pub struct TemporaryTargetFlags: u32 {
        const DEPTH = 1 << 0;
        const STENCIL = 1 << 1;
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("a render-target setup needs at least one attachment")]
    Empty,
    #[error("cannot render to {requested} simultaneous color targets (limit {limit})")]
    TooManyColorTargets { requested: usize, limit: u32 },
    #[error("the backbuffer cannot be combined with other color targets")]
    BackbufferInColorSlot,
    #[error("invalid mipmap level {mip} (image has {count})")]
    InvalidMipLevel { mip: u32, count: u32 },
    #[error("invalid slice index {slice}")]
    InvalidSlice { slice: u32 },
    #[error("all attachments must have the same pixel dimensions ({expected_width}x{expected_height}, got {width}x{height})")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
    #[error("multi-format color targets are not supported by this backend ({first:?} vs {format:?})")]
    MixedFormats {
        first: PixelFormat,
        format: PixelFormat,
    },
    #[error("all attachments must have the same MSAA sample count ({expected}, got {got})")]
    MsaaMismatch { expected: u32, got: u32 },
    #[error("depth/stencil format {0:?} cannot be used as a color target")]
    DepthStencilFormatInColorSlot(PixelFormat),
    #[error("the depth/stencil slot requires a depth/stencil format (got {0:?})")]
    NonDepthStencilFormatInDepthSlot(PixelFormat),
}

/// One attachment slot: an image plus load/store behavior and clear values.
#[derive(Clone)]
pub struct RenderTarget {
    /// `None` selects the default framebuffer (backbuffer); only valid as the
    /// sole color target.
    pub image: Option<Arc<dyn Texture>>,
    pub slice: u32,
    pub mip: u32,
    pub begin_action: BeginAction,
    pub end_action: EndAction,
    pub clear_color: Color,
    pub clear_depth: f64,
    pub clear_stencil: i32,
}

impl RenderTarget {
    pub fn new(image: Arc<dyn Texture>) -> Self {
        Self {
            image: Some(image),
            ..Self::backbuffer()
        }
    }

    pub fn backbuffer() -> Self {
        Self {
            image: None,
            slice: 0,
            mip: 0,
            begin_action: BeginAction::Load,
            end_action: EndAction::Store,
            clear_color: Color::TRANSPARENT_BLACK,
            clear_depth: 1.0,
            clear_stencil: 0,
        }
    }

    pub fn cleared_to(mut self, color: Color) -> Self {
        self.begin_action = BeginAction::Clear;
        self.clear_color = color;
        self
    }

    pub fn with_begin_action(mut self, action: BeginAction) -> Self {
        self.begin_action = action;
        self
    }

    pub fn with_end_action(mut self, action: EndAction) -> Self {
        self.end_action = action;
        self
    }

    pub fn with_mip(mut self, mip: u32) -> Self {
        self.mip = mip;
        self
    }

    pub fn with_slice(mut self, slice: u32) -> Self {
        self.slice = slice;
        self
    }
}

/// Full description of where a pass renders.
#[derive(Clone, Default)]
pub struct RenderTargetSetup {
    colors: Vec<RenderTarget>,
    depth_stencil: Option<RenderTarget>,
    temporary_flags: TemporaryTargetFlags,
}

impl RenderTargetSetup {
    pub fn new(colors: Vec<RenderTarget>) -> Self {
        Self {
            colors,
            depth_stencil: None,
            temporary_flags: TemporaryTargetFlags::empty(),
        }
    }

    /// A setup targeting the default framebuffer.
    pub fn backbuffer(target: RenderTarget) -> Self {
        Self::new(vec![RenderTarget {
            image: None,
            ..target
        }])
    }

    pub fn with_depth_stencil(mut self, target: RenderTarget) -> Self {
        self.depth_stencil = Some(target);
        self
    }

    pub fn with_temporary_flags(mut self, flags: TemporaryTargetFlags) -> Self {
        self.temporary_flags = flags;
        self
    }

    pub fn colors(&self) -> &[RenderTarget] {
        &self.colors
    }

    pub fn depth_stencil(&self) -> Option<&RenderTarget> {
        self.depth_stencil.as_ref()
    }

    pub fn temporary_flags(&self) -> TemporaryTargetFlags {
        self.temporary_flags
    }

    pub(crate) fn set_depth_stencil(&mut self, target: RenderTarget) {
        self.depth_stencil = Some(target);
    }

    /// The attachment whose properties anchor validation and pass geometry.
    pub fn first_target(&self) -> Option<&RenderTarget> {
        self.colors.first().or(self.depth_stencil.as_ref())
    }

    pub fn is_backbuffer(&self) -> bool {
        self.first_target().is_some_and(|t| t.image.is_none())
    }

    /// Pixel dimensions of the pass, taken from the first attachment at its
    /// selected mip level. `None` for backbuffer setups.
    pub fn pixel_dimensions(&self) -> Option<(u32, u32)> {
        let first = self.first_target()?;
        let image = first.image.as_ref()?;
        Some((
            image.pixel_width(first.mip),
            image.pixel_height(first.mip),
        ))
    }

    /// Validates every attachment invariant against the backend's limits.
    ///
    /// Runs before any command is recorded so violations fail fast.
    pub fn validate(&self, caps: &Capabilities) -> Result<(), TargetError> {
        let first = self.first_target().ok_or(TargetError::Empty)?;

        let Some(first_image) = first.image.as_ref() else {
            // Backbuffer pass: the windowing layer owns its properties, but
            // it cannot be mixed with offscreen color targets.
            if self.colors.len() > 1 || self.colors.iter().any(|t| t.image.is_some()) {
                return Err(TargetError::BackbufferInColorSlot);
            }
            return Ok(());
        };

        let limit = (caps.max_color_targets as usize).min(MAX_COLOR_TARGETS);
        if self.colors.len() > limit {
            return Err(TargetError::TooManyColorTargets {
                requested: self.colors.len(),
                limit: limit as u32,
            });
        }

        let expected_width = first_image.pixel_width(first.mip);
        let expected_height = first_image.pixel_height(first.mip);
        let expected_msaa = first_image.msaa_samples();
        let first_color_format = self
            .colors
            .first()
            .and_then(|t| t.image.as_ref())
            .map(|i| i.pixel_format());

        for target in &self.colors {
            let image = target.image.as_ref().ok_or(TargetError::BackbufferInColorSlot)?;
            let format = image.pixel_format();

            if target.mip >= image.mipmap_count() {
                return Err(TargetError::InvalidMipLevel {
                    mip: target.mip,
                    count: image.mipmap_count(),
                });
            }
            if !image.is_valid_slice(target.slice) {
                return Err(TargetError::InvalidSlice {
                    slice: target.slice,
                });
            }

            let (width, height) = (
                image.pixel_width(target.mip),
                image.pixel_height(target.mip),
            );
            if (width, height) != (expected_width, expected_height) {
                return Err(TargetError::DimensionMismatch {
                    expected_width,
                    expected_height,
                    width,
                    height,
                });
            }

            if let Some(first_format) = first_color_format {
                if !caps.multi_format_targets && format != first_format {
                    return Err(TargetError::MixedFormats {
                        first: first_format,
                        format,
                    });
                }
            }

            if image.msaa_samples() != expected_msaa {
                return Err(TargetError::MsaaMismatch {
                    expected: expected_msaa,
                    got: image.msaa_samples(),
                });
            }

            if format.is_depth_stencil() {
                return Err(TargetError::DepthStencilFormatInColorSlot(format));
            }
        }

        if let Some(target) = &self.depth_stencil {
            let image = target.image.as_ref().ok_or(TargetError::BackbufferInColorSlot)?;

            if !image.pixel_format().is_depth_stencil() {
                return Err(TargetError::NonDepthStencilFormatInDepthSlot(
                    image.pixel_format(),
                ));
            }
            if target.mip >= image.mipmap_count() {
                return Err(TargetError::InvalidMipLevel {
                    mip: target.mip,
                    count: image.mipmap_count(),
                });
            }
            if !image.is_valid_slice(target.slice) {
                return Err(TargetError::InvalidSlice {
                    slice: target.slice,
                });
            }

            let (width, height) = (
                image.pixel_width(target.mip),
                image.pixel_height(target.mip),
            );
            if (width, height) != (expected_width, expected_height) {
                return Err(TargetError::DimensionMismatch {
                    expected_width,
                    expected_height,
                    width,
                    height,
                });
            }
            if image.msaa_samples() != expected_msaa {
                return Err(TargetError::MsaaMismatch {
                    expected: expected_msaa,
                    got: image.msaa_samples(),
                });
            }
        }

        Ok(())
    }
}
