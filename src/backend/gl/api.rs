//! Narrow adapter trait over a raw OpenGL-style call surface.
//!
//! The executor never links against a GL loader directly; the embedder
//! supplies an implementation of [`GlApi`] bound to its context. Tests drive
//! the executor with a recording implementation.

use std::sync::Arc;

use crate::error::GfxError;
use crate::format::PixelFormat;
use crate::resources::Texture;

use super::super::{BufferBindings, VertexAttributes};

pub const GL_FRAMEBUFFER: u32 = 0x8D40;
pub const GL_READ_FRAMEBUFFER: u32 = 0x8CA8;
pub const GL_DRAW_FRAMEBUFFER: u32 = 0x8CA9;
pub const GL_FRAMEBUFFER_COMPLETE: u32 = 0x8CD5;

pub const GL_COLOR_ATTACHMENT0: u32 = 0x8CE0;
pub const GL_DEPTH_ATTACHMENT: u32 = 0x8D00;
pub const GL_STENCIL_ATTACHMENT: u32 = 0x8D20;
pub const GL_DEPTH_STENCIL_ATTACHMENT: u32 = 0x821A;

// Invalidate targets for the default framebuffer.
pub const GL_COLOR: u32 = 0x1800;
pub const GL_DEPTH: u32 = 0x1801;
pub const GL_STENCIL: u32 = 0x1802;

pub const GL_COLOR_BUFFER_BIT: u32 = 0x0000_4000;
pub const GL_DEPTH_BUFFER_BIT: u32 = 0x0000_0100;
pub const GL_STENCIL_BUFFER_BIT: u32 = 0x0000_0400;

pub const GL_BLEND: u32 = 0x0BE2;
pub const GL_SCISSOR_TEST: u32 = 0x0C11;
pub const GL_DEPTH_TEST: u32 = 0x0B71;
pub const GL_STENCIL_TEST: u32 = 0x0B90;
pub const GL_CULL_FACE: u32 = 0x0B44;
pub const GL_FRAMEBUFFER_SRGB: u32 = 0x8DB9;

pub const GL_NEVER: u32 = 0x0200;
pub const GL_LESS: u32 = 0x0201;
pub const GL_EQUAL: u32 = 0x0202;
pub const GL_LEQUAL: u32 = 0x0203;
pub const GL_GREATER: u32 = 0x0204;
pub const GL_NOTEQUAL: u32 = 0x0205;
pub const GL_GEQUAL: u32 = 0x0206;
pub const GL_ALWAYS: u32 = 0x0207;

pub const GL_ZERO: u32 = 0;
pub const GL_ONE: u32 = 1;
pub const GL_KEEP: u32 = 0x1E00;
pub const GL_REPLACE: u32 = 0x1E01;
pub const GL_INCR: u32 = 0x1E02;
pub const GL_DECR: u32 = 0x1E03;
pub const GL_INCR_WRAP: u32 = 0x8507;
pub const GL_DECR_WRAP: u32 = 0x8508;
pub const GL_INVERT: u32 = 0x150A;

pub const GL_FUNC_ADD: u32 = 0x8006;
pub const GL_MIN: u32 = 0x8007;
pub const GL_MAX: u32 = 0x8008;
pub const GL_FUNC_SUBTRACT: u32 = 0x800A;
pub const GL_FUNC_REVERSE_SUBTRACT: u32 = 0x800B;

pub const GL_SRC_COLOR: u32 = 0x0300;
pub const GL_ONE_MINUS_SRC_COLOR: u32 = 0x0301;
pub const GL_SRC_ALPHA: u32 = 0x0302;
pub const GL_ONE_MINUS_SRC_ALPHA: u32 = 0x0303;
pub const GL_DST_ALPHA: u32 = 0x0304;
pub const GL_ONE_MINUS_DST_ALPHA: u32 = 0x0305;
pub const GL_DST_COLOR: u32 = 0x0306;
pub const GL_ONE_MINUS_DST_COLOR: u32 = 0x0307;
pub const GL_SRC_ALPHA_SATURATE: u32 = 0x0308;

pub const GL_CW: u32 = 0x0900;
pub const GL_CCW: u32 = 0x0901;
pub const GL_FRONT: u32 = 0x0404;
pub const GL_BACK: u32 = 0x0405;
pub const GL_FRONT_AND_BACK: u32 = 0x0408;
pub const GL_LINE: u32 = 0x1B01;
pub const GL_FILL: u32 = 0x1B02;

pub const GL_POINTS: u32 = 0x0000;
pub const GL_LINES: u32 = 0x0001;
pub const GL_LINE_STRIP: u32 = 0x0003;
pub const GL_TRIANGLES: u32 = 0x0004;
pub const GL_TRIANGLE_STRIP: u32 = 0x0005;
pub const GL_TRIANGLE_FAN: u32 = 0x0006;

pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
pub const GL_UNSIGNED_INT: u32 = 0x1405;

pub const GL_ELEMENT_ARRAY_BUFFER: u32 = 0x8893;

/// Raw GL-style call surface plus the extension/limit queries the executor
/// consults.
///
/// Native object names are widened to `u64` so implementations can forward
/// handles from [`Texture::native_handle`] without conversion.
pub trait GlApi {
    // Framebuffer objects.
    fn create_framebuffer(&mut self) -> u32;
    fn delete_framebuffer(&mut self, fbo: u32);
    fn bind_framebuffer(&mut self, target: u32, fbo: u32);
    /// Attaches `texture` mip `level` (optionally array `layer`) to the bound
    /// framebuffer.
    fn framebuffer_texture(&mut self, attachment: u32, texture: u64, level: u32, layer: Option<u32>);
    fn check_framebuffer_status(&mut self) -> u32;
    fn invalidate_framebuffer(&mut self, target: u32, attachments: &[u32]);
    fn blit_framebuffer(&mut self, width: i32, height: i32, mask: u32);
    /// Native one-call multisample resolve, when [`Self::supports_native_resolve`].
    fn resolve_multisample(&mut self);
    fn read_buffer(&mut self, src: u32);

    // Clears.
    fn clear(&mut self, mask: u32);
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&mut self, depth: f64);
    fn clear_stencil(&mut self, value: i32);
    /// `glClearBufferfv`-style per-attachment color clear.
    fn clear_buffer_color(&mut self, attachment_index: u32, rgba: [f32; 4]);

    // State.
    fn set_enabled(&mut self, cap: u32, enabled: bool);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn blend_equation_separate(&mut self, rgb: u32, alpha: u32);
    fn blend_func_separate(&mut self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
    fn depth_func(&mut self, func: u32);
    fn depth_mask(&mut self, write: bool);
    fn stencil_func(&mut self, func: u32, reference: i32, mask: u32);
    fn stencil_op(&mut self, fail: u32, depth_fail: u32, pass: u32);
    fn stencil_mask(&mut self, mask: u32);
    fn color_mask(&mut self, r: bool, g: bool, b: bool, a: bool);
    fn cull_face(&mut self, mode: u32);
    fn front_face(&mut self, winding: u32);
    fn polygon_mode(&mut self, face: u32, mode: u32);
    fn use_program(&mut self, program: u32);
    fn vertex_attrib4f(&mut self, index: u32, x: f32, y: f32, z: f32, w: f32);

    // Geometry.
    fn bind_buffer(&mut self, target: u32, buffer: u64);
    /// Applies the attribute layout and per-buffer bindings for the next draw.
    fn apply_vertex_attributes(&mut self, attributes: &VertexAttributes, buffers: &BufferBindings);
    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32);
    fn draw_arrays_instanced(&mut self, mode: u32, first: i32, count: i32, instances: i32);
    fn draw_elements(&mut self, mode: u32, count: i32, index_type: u32, offset: usize);
    fn draw_elements_instanced(
        &mut self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
    );
    fn draw_elements_base_vertex(
        &mut self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    );

    // Resource synthesis (delegated; the executor never allocates GPU memory).
    fn acquire_temporary_target(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError>;

    // Capability queries.
    fn max_color_attachments(&self) -> u32;
    fn supports_instancing(&self) -> bool;
    fn supports_base_vertex(&self) -> bool;
    fn supports_invalidate(&self) -> bool;
    fn supports_native_resolve(&self) -> bool;
    fn supports_srgb_write_control(&self) -> bool;
    fn supports_wireframe(&self) -> bool;
    fn supports_multi_format_targets(&self) -> bool;
    fn supports_format(&self, format: PixelFormat) -> bool;
}
