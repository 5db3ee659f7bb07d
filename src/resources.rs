//! Trait boundary between the pass engine and externally-owned objects.
//!
//! The engine records *intents to use* these objects and defers to them at
//! execute time; it never allocates or uploads GPU memory on their behalf.

use glam::Mat4;

use crate::backend::{Backend, DrawContext};
use crate::error::GfxError;
use crate::format::PixelFormat;

/// Mipmap regeneration policy of an attachment image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MipmapMode {
    /// No mipmaps beyond the base level.
    None,
    /// Mipmaps exist but are regenerated by the owner.
    Manual,
    /// Mipmaps are regenerated automatically after a pass renders to the
    /// base level.
    Auto,
}

/// An object that can be drawn during command replay.
///
/// The resolved transform was captured when the draw was recorded; the
/// drawable issues geometry through the backend's draw entry points.
pub trait Drawable {
    fn draw(
        &self,
        backend: &mut dyn Backend,
        ctx: &mut DrawContext,
        transform: Mat4,
    ) -> Result<(), GfxError>;
}

/// A drawable that additionally supports instanced rendering.
pub trait Mesh: Drawable {
    fn draw_instanced(
        &self,
        backend: &mut dyn Backend,
        ctx: &mut DrawContext,
        transform: Mat4,
        instance_count: u32,
    ) -> Result<(), GfxError>;
}

/// An image that can be bound as a pass attachment.
///
/// Used purely for validation, framebuffer binding and post-pass mipmap
/// regeneration; the engine never touches its storage.
pub trait Texture {
    fn pixel_format(&self) -> PixelFormat;
    /// Width in pixels of the given mip level.
    fn pixel_width(&self, mip: u32) -> u32;
    /// Height in pixels of the given mip level.
    fn pixel_height(&self, mip: u32) -> u32;
    fn mipmap_count(&self) -> u32;
    fn is_valid_slice(&self, slice: u32) -> bool;
    /// Multisample count; 1 means not multisampled.
    fn msaa_samples(&self) -> u32;
    /// Whether the image contents can be read back (resolve target).
    fn is_readable(&self) -> bool;
    fn mipmap_mode(&self) -> MipmapMode;
    /// Regenerates mip levels from the base level.
    fn generate_mipmaps(&self);
    /// Native object handle (e.g. a GL texture name).
    fn native_handle(&self) -> u64;
}

/// A shader program; bound by identity, never inspected.
pub trait Shader {
    fn native_handle(&self) -> u64;
}

/// An index or vertex buffer owned by the caller.
pub trait GpuBuffer {
    fn native_handle(&self) -> u64;
}
