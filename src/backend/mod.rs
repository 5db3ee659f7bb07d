//! Backend executors: translate the recorded, backend-agnostic command
//! vocabulary into a concrete graphics API.

pub mod gl;
pub mod null;

use std::sync::Arc;

use glam::{Mat4, Vec4};

use crate::color::Color;
use crate::error::GfxError;
use crate::format::PixelFormat;
use crate::resources::{GpuBuffer, Shader, Texture};
use crate::state::{RenderState, StateBits};
use crate::target::RenderTargetSetup;

/// Backend limits and feature bits consulted during validation and recording.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Maximum simultaneous color attachments.
    pub max_color_targets: u32,
    /// Whether instanced draws are supported.
    pub instancing: bool,
    /// Whether color attachments may use differing pixel formats.
    pub multi_format_targets: bool,
    /// Whether indexed draws can apply a base vertex offset.
    pub base_vertex: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            max_color_targets: 1,
            instancing: false,
            multi_format_targets: false,
            base_vertex: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexDataType {
    U16,
    U32,
}

pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Which bound buffer this attribute reads from.
    pub buffer_index: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferLayout {
    /// Bytes between consecutive vertices in the buffer.
    pub stride: u32,
}

/// Enabled vertex attributes plus the per-buffer layouts they read through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexAttributes {
    /// Bitmask over attribute indices.
    pub enabled: u32,
    pub attribs: [VertexAttribute; MAX_VERTEX_ATTRIBUTES],
    pub buffer_layouts: [BufferLayout; MAX_VERTEX_ATTRIBUTES],
}

impl VertexAttributes {
    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled & (1 << index) != 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferBinding {
    /// Native buffer handle.
    pub buffer: u64,
    /// Byte offset of vertex 0.
    pub offset: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferBindings {
    pub info: [BufferBinding; MAX_VERTEX_ATTRIBUTES],
}

/// Data every draw can rely on, resolved once per pass.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinUniforms {
    /// Transform captured when the draw was recorded.
    pub transform: Mat4,
    /// Projection for the active coordinate convention.
    pub projection: Mat4,
    /// `(width, height, 1/width, 1/height)` of the pass in pixels.
    pub screen_size: Vec4,
}

/// State threaded through one `execute()` call.
///
/// The recorder accumulates state changes into `state_diff` and the pending
/// fields; the backend consumes the diff right before each draw and issues
/// only the native calls for axes that actually changed.
pub struct DrawContext {
    pub state_diff: StateBits,
    pub color: Color,
    pub shader: Option<Arc<dyn Shader>>,
    pub render: RenderState,
    pub builtin: BuiltinUniforms,
    pub is_backbuffer: bool,
    pub gamma_correct: bool,
    pub pass_width: u32,
    pub pass_height: u32,
}

impl DrawContext {
    pub fn new(pass_width: u32, pass_height: u32, is_backbuffer: bool, gamma_correct: bool) -> Self {
        let (w, h) = (pass_width.max(1) as f32, pass_height.max(1) as f32);
        Self {
            state_diff: StateBits::all(),
            color: Color::WHITE,
            shader: None,
            render: RenderState::default(),
            builtin: BuiltinUniforms {
                transform: Mat4::IDENTITY,
                projection: Mat4::IDENTITY,
                screen_size: Vec4::new(w, h, 1.0 / w, 1.0 / h),
            },
            is_backbuffer,
            gamma_correct,
            pass_width,
            pass_height,
        }
    }
}

/// One concrete graphics API.
///
/// Implementations own no long-lived pass state beyond what is needed to
/// issue the next draw; everything else arrives through [`DrawContext`].
pub trait Backend {
    fn capabilities(&self) -> Capabilities;

    /// Pixel size of the default framebuffer.
    fn backbuffer_size(&self) -> (u32, u32);

    /// Whether `format` can back a render-target image on this backend.
    fn supports_format(&self, format: PixelFormat) -> bool;

    /// Allocates (or reuses) a pass-lifetime depth/stencil image.
    fn acquire_temporary_target(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError>;

    /// Binds the render targets and performs begin actions (clear/discard).
    fn begin_pass(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &mut DrawContext,
    ) -> Result<(), GfxError>;

    /// Performs end actions: discard, then MSAA resolve, in attachment order.
    fn end_pass(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &mut DrawContext,
    ) -> Result<(), GfxError>;

    /// Issues native calls for every set bit in `ctx.state_diff`, then clears
    /// the mask.
    fn apply_state(&mut self, ctx: &mut DrawContext) -> Result<(), GfxError>;

    /// Remembers the attribute/buffer bindings the next draw will use.
    fn set_vertex_attributes(&mut self, attributes: &VertexAttributes, buffers: &BufferBindings);

    fn draw_primitives(
        &mut self,
        primitive: PrimitiveType,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
    ) -> Result<(), GfxError>;

    #[allow(clippy::too_many_arguments)]
    fn draw_indexed(
        &mut self,
        primitive: PrimitiveType,
        index_count: u32,
        instance_count: u32,
        index_type: IndexDataType,
        index_buffer: &dyn GpuBuffer,
        index_offset: u64,
    ) -> Result<(), GfxError>;

    /// Draws `count` quads starting at quad `start` from a shared quad index
    /// buffer, splitting whenever a single draw would exceed the maximum
    /// representable index count.
    fn draw_quads(
        &mut self,
        start: u32,
        count: u32,
        quad_index_buffer: &dyn GpuBuffer,
    ) -> Result<(), GfxError>;
}
