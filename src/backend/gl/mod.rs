//! OpenGL-style reference executor.
//!
//! Translates the abstract state/command vocabulary into calls on a [`GlApi`]
//! adapter supplied by the embedder. Owns no long-lived pass state beyond a
//! framebuffer cache and the bindings needed to issue the next draw.

mod api;

pub use api::*;

use std::num::NonZeroUsize;
use std::sync::Arc;

use glam::Mat4;
use lru::LruCache;
use tracing::{debug, trace};

use crate::color::Color;
use crate::error::GfxError;
use crate::format::PixelFormat;
use crate::resources::{GpuBuffer, Texture};
use crate::state::{
    reversed_compare_mode, BlendFactor, BlendOperation, CompareMode, CullMode, StateBits,
    StencilAction, Winding,
};
use crate::target::{BeginAction, EndAction, RenderTargetSetup};

use super::{
    Backend, BufferBindings, Capabilities, DrawContext, IndexDataType, PrimitiveType,
    VertexAttributes, MAX_VERTEX_ATTRIBUTES,
};

/// Generic vertex attribute slot carrying the constant draw color.
pub const ATTRIB_CONSTANT_COLOR: u32 = 3;

const FBO_CACHE_CAPACITY: usize = 64;

const MAX_VERTICES_PER_DRAW: u32 = u16::MAX as u32;
const MAX_QUADS_PER_DRAW: u32 = MAX_VERTICES_PER_DRAW / 4;

/// Properties of the default framebuffer, owned by the windowing layer.
#[derive(Clone, Copy, Debug)]
pub struct GlBackendConfig {
    pub backbuffer_width: u32,
    pub backbuffer_height: u32,
    /// Whether backbuffer writes are sRGB-encoded when gamma-correct
    /// rendering is active.
    pub backbuffer_srgb: bool,
}

/// Identity of a framebuffer's attachments: (native handle, mip, slice).
///
/// A multisampled image renders through one framebuffer and resolves into
/// another, so resolve destinations are keyed separately.
#[derive(Clone, PartialEq, Eq, Hash)]
struct FboKey {
    colors: Vec<(u64, u32, u32)>,
    depth_stencil: Option<(u64, u32, u32)>,
    resolve: bool,
}

impl FboKey {
    fn for_targets(targets: &RenderTargetSetup) -> Self {
        let colors = targets
            .colors()
            .iter()
            .filter_map(|t| {
                t.image
                    .as_ref()
                    .map(|i| (i.native_handle(), t.mip, t.slice))
            })
            .collect();
        let depth_stencil = targets.depth_stencil().and_then(|t| {
            t.image
                .as_ref()
                .map(|i| (i.native_handle(), t.mip, t.slice))
        });
        Self {
            colors,
            depth_stencil,
            resolve: false,
        }
    }
}

enum PassBoundary {
    Begin,
    End,
}

pub struct GlBackend<A: GlApi> {
    api: A,
    caps: Capabilities,
    config: GlBackendConfig,
    /// Framebuffer objects keyed by attachment identity. Eviction deletes the
    /// native object.
    fbo_cache: LruCache<FboKey, u32>,
    /// Last synchronized sRGB write-enable; `None` until the first pass.
    srgb_write: Option<bool>,
    /// Mirrors the native depth write mask; it also gates depth clears.
    depth_writes: bool,
    current_attributes: VertexAttributes,
    current_buffers: BufferBindings,
}

impl<A: GlApi> GlBackend<A> {
    pub fn new(api: A, config: GlBackendConfig) -> Self {
        let caps = Capabilities {
            max_color_targets: api.max_color_attachments(),
            instancing: api.supports_instancing(),
            multi_format_targets: api.supports_multi_format_targets(),
            base_vertex: api.supports_base_vertex(),
        };
        Self {
            api,
            caps,
            config,
            fbo_cache: LruCache::new(
                NonZeroUsize::new(FBO_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            srgb_write: None,
            depth_writes: false,
            current_attributes: VertexAttributes::default(),
            current_buffers: BufferBindings::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Binds (creating and caching if needed) the framebuffer for `targets`.
    fn bind_pass_framebuffer(&mut self, targets: &RenderTargetSetup) -> Result<u32, GfxError> {
        let key = FboKey::for_targets(targets);
        if let Some(&fbo) = self.fbo_cache.get(&key) {
            self.api.bind_framebuffer(GL_FRAMEBUFFER, fbo);
            return Ok(fbo);
        }

        let fbo = self.api.create_framebuffer();
        self.api.bind_framebuffer(GL_FRAMEBUFFER, fbo);

        for (i, target) in targets.colors().iter().enumerate() {
            if let Some(image) = &target.image {
                self.api.framebuffer_texture(
                    GL_COLOR_ATTACHMENT0 + i as u32,
                    image.native_handle(),
                    target.mip,
                    layer_for_slice(image, target.slice),
                );
            }
        }
        if let Some(target) = targets.depth_stencil() {
            if let Some(image) = &target.image {
                self.api.framebuffer_texture(
                    depth_stencil_attachment_point(image.pixel_format()),
                    image.native_handle(),
                    target.mip,
                    layer_for_slice(image, target.slice),
                );
            }
        }

        let status = self.api.check_framebuffer_status();
        if status != GL_FRAMEBUFFER_COMPLETE {
            self.api.delete_framebuffer(fbo);
            return Err(GfxError::IncompleteFramebuffer { status });
        }

        if let Some((_, evicted)) = self.fbo_cache.push(key, fbo) {
            if evicted != fbo {
                self.api.delete_framebuffer(evicted);
            }
        }
        Ok(fbo)
    }

    /// Framebuffer with `image` as its only attachment, used as the
    /// destination of a multisample resolve. Binds it as the draw target.
    fn bind_resolve_framebuffer(
        &mut self,
        image: &Arc<dyn Texture>,
        mip: u32,
        slice: u32,
    ) -> Result<u32, GfxError> {
        let format = image.pixel_format();
        let entry = (image.native_handle(), mip, slice);
        let key = if format.is_depth_stencil() {
            FboKey {
                colors: Vec::new(),
                depth_stencil: Some(entry),
                resolve: true,
            }
        } else {
            FboKey {
                colors: vec![entry],
                depth_stencil: None,
                resolve: true,
            }
        };

        if let Some(&fbo) = self.fbo_cache.get(&key) {
            self.api.bind_framebuffer(GL_DRAW_FRAMEBUFFER, fbo);
            return Ok(fbo);
        }

        let fbo = self.api.create_framebuffer();
        self.api.bind_framebuffer(GL_DRAW_FRAMEBUFFER, fbo);
        let attachment = if format.is_depth_stencil() {
            depth_stencil_attachment_point(format)
        } else {
            GL_COLOR_ATTACHMENT0
        };
        self.api.framebuffer_texture(
            attachment,
            image.native_handle(),
            mip,
            layer_for_slice(image, slice),
        );

        let status = self.api.check_framebuffer_status();
        if status != GL_FRAMEBUFFER_COMPLETE {
            self.api.delete_framebuffer(fbo);
            return Err(GfxError::IncompleteFramebuffer { status });
        }

        if let Some((_, evicted)) = self.fbo_cache.push(key, fbo) {
            if evicted != fbo {
                self.api.delete_framebuffer(evicted);
            }
        }
        Ok(fbo)
    }

    fn discard_if_needed(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &DrawContext,
        boundary: PassBoundary,
    ) {
        if !self.api.supports_invalidate() {
            return;
        }

        let mut attachments = Vec::new();
        for (i, target) in targets.colors().iter().enumerate() {
            let discard = match boundary {
                PassBoundary::Begin => target.begin_action == BeginAction::Discard,
                PassBoundary::End => target.end_action == EndAction::Discard,
            };
            if discard {
                attachments.push(if ctx.is_backbuffer {
                    GL_COLOR
                } else {
                    GL_COLOR_ATTACHMENT0 + i as u32
                });
            }
        }
        if let Some(target) = targets.depth_stencil() {
            let discard = match boundary {
                PassBoundary::Begin => target.begin_action == BeginAction::Discard,
                PassBoundary::End => target.end_action == EndAction::Discard,
            };
            if discard {
                match target.image.as_ref().map(|i| i.pixel_format()) {
                    Some(format) => {
                        if format.is_depth() {
                            attachments.push(GL_DEPTH_ATTACHMENT);
                        }
                        if format.is_stencil() {
                            attachments.push(GL_STENCIL_ATTACHMENT);
                        }
                    }
                    None => {
                        attachments.push(GL_DEPTH);
                        attachments.push(GL_STENCIL);
                    }
                }
            }
        }

        if !attachments.is_empty() {
            self.api.invalidate_framebuffer(GL_FRAMEBUFFER, &attachments);
        }
    }

    fn sync_srgb_write(&mut self, targets: &RenderTargetSetup, ctx: &DrawContext) {
        if !self.api.supports_srgb_write_control() {
            return;
        }

        let mut has_srgb = ctx.is_backbuffer && ctx.gamma_correct && self.config.backbuffer_srgb;
        for target in targets.colors() {
            if target
                .image
                .as_ref()
                .is_some_and(|i| i.pixel_format().is_srgb())
            {
                has_srgb = true;
                break;
            }
        }

        if self.srgb_write != Some(has_srgb) {
            self.api.set_enabled(GL_FRAMEBUFFER_SRGB, has_srgb);
            self.srgb_write = Some(has_srgb);
        }
    }

    fn clear_attachments(&mut self, targets: &RenderTargetSetup, ctx: &DrawContext) {
        let correct = |c: Color| if ctx.gamma_correct { c.gamma_corrected() } else { c };

        let mut clear_flags = 0u32;
        let colors = targets.colors();

        if ctx.is_backbuffer || colors.len() == 1 {
            if let Some(target) = colors.first() {
                if target.begin_action == BeginAction::Clear {
                    let c = correct(target.clear_color);
                    self.api.clear_color(c.r, c.g, c.b, c.a);
                    clear_flags |= GL_COLOR_BUFFER_BIT;
                }
            }
        } else {
            for (i, target) in colors.iter().enumerate() {
                if target.begin_action == BeginAction::Clear {
                    self.api
                        .clear_buffer_color(i as u32, correct(target.clear_color).to_array());
                }
            }
        }

        let mut restore_depth_mask = false;
        if let Some(target) = targets.depth_stencil() {
            if target.begin_action == BeginAction::Clear {
                // The depth write mask also gates depth clears.
                if !self.depth_writes {
                    self.api.depth_mask(true);
                    restore_depth_mask = true;
                }
                self.api.stencil_mask(u32::MAX);
                self.api.clear_depth(target.clear_depth);
                self.api.clear_stencil(target.clear_stencil);
                clear_flags |= GL_DEPTH_BUFFER_BIT | GL_STENCIL_BUFFER_BIT;
            }
        }

        if clear_flags != 0 {
            self.api.clear(clear_flags);
        }
        if restore_depth_mask {
            self.api.depth_mask(false);
        }
    }

    fn resolve_msaa(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &DrawContext,
    ) -> Result<(), GfxError> {
        if ctx.is_backbuffer {
            return Ok(());
        }

        let first_msaa = targets
            .colors()
            .first()
            .and_then(|t| t.image.as_ref())
            .map_or(1, |i| i.msaa_samples());

        if first_msaa > 1 {
            // MSAA is limited to 2D targets, so slice resolves never happen.
            let first = &targets.colors()[0];
            let Some(image) = &first.image else {
                return Ok(());
            };
            let w = image.pixel_width(first.mip) as i32;
            let h = image.pixel_height(first.mip) as i32;

            for (i, target) in targets.colors().iter().enumerate() {
                let Some(image) = &target.image else { continue };
                if !image.is_readable() {
                    continue;
                }

                self.api.read_buffer(GL_COLOR_ATTACHMENT0 + i as u32);
                self.bind_resolve_framebuffer(image, target.mip, target.slice)?;

                if self.api.supports_native_resolve() {
                    self.api.resolve_multisample();
                } else {
                    self.api.blit_framebuffer(w, h, GL_COLOR_BUFFER_BIT);
                }
            }
        }

        if let Some(target) = targets.depth_stencil() {
            if let Some(image) = &target.image {
                if image.msaa_samples() > 1 && image.is_readable() {
                    self.bind_resolve_framebuffer(image, target.mip, target.slice)?;

                    if self.api.supports_native_resolve() {
                        self.api.resolve_multisample();
                    } else {
                        let format = image.pixel_format();
                        let mut mask = 0u32;
                        if format.is_depth() {
                            mask |= GL_DEPTH_BUFFER_BIT;
                        }
                        if format.is_stencil() {
                            mask |= GL_STENCIL_BUFFER_BIT;
                        }
                        if mask != 0 {
                            let w = image.pixel_width(target.mip) as i32;
                            let h = image.pixel_height(target.mip) as i32;
                            self.api.blit_framebuffer(w, h, mask);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl<A: GlApi> Backend for GlBackend<A> {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn backbuffer_size(&self) -> (u32, u32) {
        (self.config.backbuffer_width, self.config.backbuffer_height)
    }

    fn supports_format(&self, format: PixelFormat) -> bool {
        self.api.supports_format(format)
    }

    fn acquire_temporary_target(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        msaa: u32,
    ) -> Result<Arc<dyn Texture>, GfxError> {
        self.api.acquire_temporary_target(format, width, height, msaa)
    }

    fn begin_pass(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        let w = ctx.pass_width as f32;
        let h = ctx.pass_height as f32;

        if ctx.is_backbuffer {
            self.api.bind_framebuffer(GL_FRAMEBUFFER, 0);
            // The default framebuffer puts (0,0) at the bottom-left; flip the
            // vertical axis so recorded content stays top-left origin.
            ctx.builtin.projection = Mat4::orthographic_rh_gl(0.0, w, h, 0.0, -10.0, 10.0);
        } else {
            self.bind_pass_framebuffer(targets)?;
            ctx.builtin.projection = Mat4::orthographic_rh_gl(0.0, w, 0.0, h, -10.0, 10.0);
        }

        self.api
            .viewport(0, 0, ctx.pass_width as i32, ctx.pass_height as i32);

        self.sync_srgb_write(targets, ctx);
        self.clear_attachments(targets, ctx);
        self.discard_if_needed(targets, ctx, PassBoundary::Begin);

        // Scissor rects and face winding depend on which coordinate
        // convention is active, so their first application cannot be elided.
        ctx.state_diff |= StateBits::SCISSOR | StateBits::FACE_WINDING;

        debug!(
            backbuffer = ctx.is_backbuffer,
            width = ctx.pass_width,
            height = ctx.pass_height,
            colors = targets.colors().len(),
            "begin pass"
        );
        Ok(())
    }

    fn end_pass(
        &mut self,
        targets: &RenderTargetSetup,
        ctx: &mut DrawContext,
    ) -> Result<(), GfxError> {
        self.discard_if_needed(targets, ctx, PassBoundary::End);
        self.resolve_msaa(targets, ctx)
    }

    fn apply_state(&mut self, ctx: &mut DrawContext) -> Result<(), GfxError> {
        let diff = ctx.state_diff;
        if diff.is_empty() {
            return Ok(());
        }
        trace!(?diff, "apply state diff");

        if diff.contains(StateBits::SHADER) {
            let program = ctx
                .shader
                .as_ref()
                .map_or(0, |s| s.native_handle() as u32);
            self.api.use_program(program);
        }

        if diff.contains(StateBits::COLOR) {
            let c = ctx.color;
            self.api
                .vertex_attrib4f(ATTRIB_CONSTANT_COLOR, c.r, c.g, c.b, c.a);
        }

        if diff.contains(StateBits::BLEND) {
            let blend = ctx.render.blend;
            self.api.set_enabled(GL_BLEND, blend.enable);
            if blend.enable {
                self.api.blend_equation_separate(
                    gl_blend_operation(blend.operation_rgb),
                    gl_blend_operation(blend.operation_a),
                );
                self.api.blend_func_separate(
                    gl_blend_factor(blend.src_factor_rgb),
                    gl_blend_factor(blend.dst_factor_rgb),
                    gl_blend_factor(blend.src_factor_a),
                    gl_blend_factor(blend.dst_factor_a),
                );
            }
        }

        if diff.contains(StateBits::SCISSOR) {
            let scissor = ctx.render.scissor;
            self.api.set_enabled(GL_SCISSOR_TEST, scissor.enable);
            if scissor.enable {
                let r = scissor.rect;
                if ctx.is_backbuffer {
                    // Scissor rects start from the lower-left of the default
                    // framebuffer instead of the top-left.
                    self.api.scissor(
                        r.x,
                        ctx.pass_height as i32 - (r.y + r.height),
                        r.width,
                        r.height,
                    );
                } else {
                    self.api.scissor(r.x, r.y, r.width, r.height);
                }
            }
        }

        if diff.contains(StateBits::DEPTH) {
            let depth = ctx.render.depth;
            let enable = depth.compare != CompareMode::Always || depth.write;
            self.api.set_enabled(GL_DEPTH_TEST, enable);
            if enable {
                self.api.depth_func(gl_compare_mode(depth.compare));
                self.api.depth_mask(depth.write);
                self.depth_writes = depth.write;
            }
        }

        if diff.contains(StateBits::STENCIL) {
            let stencil = ctx.render.stencil;
            let enable =
                stencil.compare != CompareMode::Always || stencil.action != StencilAction::Keep;
            // The stencil test must be enabled to write the stencil buffer.
            self.api.set_enabled(GL_STENCIL_TEST, enable);

            // The native test passes when the reference satisfies the compare
            // against the buffer value; the recorded semantics promise the
            // opposite reading, so mirror ordered comparisons.
            let compare = gl_compare_mode(reversed_compare_mode(stencil.compare));
            self.api
                .stencil_func(compare, stencil.value, stencil.read_mask);
            self.api
                .stencil_op(GL_KEEP, GL_KEEP, gl_stencil_action(stencil.action));
            self.api.stencil_mask(stencil.write_mask);
        }

        if diff.contains(StateBits::CULL_MODE) {
            match ctx.render.cull_mode {
                CullMode::None => self.api.set_enabled(GL_CULL_FACE, false),
                CullMode::Back => {
                    self.api.set_enabled(GL_CULL_FACE, true);
                    self.api.cull_face(GL_BACK);
                }
                CullMode::Front => {
                    self.api.set_enabled(GL_CULL_FACE, true);
                    self.api.cull_face(GL_FRONT);
                }
            }
        }

        if diff.contains(StateBits::FACE_WINDING) {
            let mut winding = ctx.render.winding;
            // Offscreen targets render through a vertically flipped
            // projection, which reverses the apparent winding.
            if !ctx.is_backbuffer {
                winding = match winding {
                    Winding::Clockwise => Winding::CounterClockwise,
                    Winding::CounterClockwise => Winding::Clockwise,
                };
            }
            self.api.front_face(match winding {
                Winding::Clockwise => GL_CW,
                Winding::CounterClockwise => GL_CCW,
            });
        }

        if diff.contains(StateBits::COLOR_MASK) {
            let mask = ctx.render.color_mask;
            self.api.color_mask(mask.r, mask.g, mask.b, mask.a);
        }

        if diff.contains(StateBits::WIREFRAME) && self.api.supports_wireframe() {
            let mode = if ctx.render.wireframe { GL_LINE } else { GL_FILL };
            self.api.polygon_mode(GL_FRONT_AND_BACK, mode);
        }

        ctx.state_diff = StateBits::empty();
        Ok(())
    }

    fn set_vertex_attributes(&mut self, attributes: &VertexAttributes, buffers: &BufferBindings) {
        self.current_attributes = *attributes;
        self.current_buffers = *buffers;
    }

    fn draw_primitives(
        &mut self,
        primitive: PrimitiveType,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
    ) -> Result<(), GfxError> {
        self.api
            .apply_vertex_attributes(&self.current_attributes, &self.current_buffers);

        let mode = gl_primitive_type(primitive);
        if instance_count > 1 {
            if !self.caps.instancing {
                return Err(GfxError::Unsupported("gl.instanced_draw"));
            }
            self.api.draw_arrays_instanced(
                mode,
                first_vertex as i32,
                vertex_count as i32,
                instance_count as i32,
            );
        } else {
            self.api
                .draw_arrays(mode, first_vertex as i32, vertex_count as i32);
        }
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        primitive: PrimitiveType,
        index_count: u32,
        instance_count: u32,
        index_type: IndexDataType,
        index_buffer: &dyn GpuBuffer,
        index_offset: u64,
    ) -> Result<(), GfxError> {
        self.api
            .apply_vertex_attributes(&self.current_attributes, &self.current_buffers);
        self.api
            .bind_buffer(GL_ELEMENT_ARRAY_BUFFER, index_buffer.native_handle());

        let mode = gl_primitive_type(primitive);
        let gl_type = gl_index_type(index_type);
        if instance_count > 1 {
            if !self.caps.instancing {
                return Err(GfxError::Unsupported("gl.instanced_draw"));
            }
            self.api.draw_elements_instanced(
                mode,
                index_count as i32,
                gl_type,
                index_offset as usize,
                instance_count as i32,
            );
        } else {
            self.api
                .draw_elements(mode, index_count as i32, gl_type, index_offset as usize);
        }
        Ok(())
    }

    fn draw_quads(
        &mut self,
        start: u32,
        count: u32,
        quad_index_buffer: &dyn GpuBuffer,
    ) -> Result<(), GfxError> {
        self.api
            .bind_buffer(GL_ELEMENT_ARRAY_BUFFER, quad_index_buffer.native_handle());

        if self.caps.base_vertex {
            self.api
                .apply_vertex_attributes(&self.current_attributes, &self.current_buffers);

            let mut base_vertex = (start * 4) as i32;
            let mut drawn = 0;
            while drawn < count {
                let quad_count = MAX_QUADS_PER_DRAW.min(count - drawn);
                self.api.draw_elements_base_vertex(
                    GL_TRIANGLES,
                    (quad_count * 6) as i32,
                    GL_UNSIGNED_SHORT,
                    0,
                    base_vertex,
                );
                base_vertex += (quad_count * 4) as i32;
                drawn += quad_count;
            }
        } else {
            // Without base-vertex draws the per-buffer byte offsets have to
            // be advanced manually across split draws.
            let mut buffers = self.current_buffers;
            if start > 0 {
                advance_vertex_offsets(&self.current_attributes, &mut buffers, (start * 4) as u64);
            }

            let mut drawn = 0;
            while drawn < count {
                self.api
                    .apply_vertex_attributes(&self.current_attributes, &buffers);

                let quad_count = MAX_QUADS_PER_DRAW.min(count - drawn);
                self.api.draw_elements(
                    GL_TRIANGLES,
                    (quad_count * 6) as i32,
                    GL_UNSIGNED_SHORT,
                    0,
                );
                drawn += quad_count;

                if drawn < count {
                    advance_vertex_offsets(
                        &self.current_attributes,
                        &mut buffers,
                        (quad_count * 4) as u64,
                    );
                }
            }
        }
        Ok(())
    }
}

/// Advances every bound buffer's byte offset by `vertex_count` vertices.
fn advance_vertex_offsets(
    attributes: &VertexAttributes,
    buffers: &mut BufferBindings,
    vertex_count: u64,
) {
    let mut touched = 0u32;
    for i in 0..MAX_VERTEX_ATTRIBUTES {
        if !attributes.is_enabled(i) {
            continue;
        }
        let buffer_index = attributes.attribs[i].buffer_index as usize;
        let bit = 1u32 << buffer_index;
        if touched & bit == 0 {
            touched |= bit;
            let stride = attributes.buffer_layouts[buffer_index].stride as u64;
            buffers.info[buffer_index].offset += stride * vertex_count;
        }
    }
}

fn layer_for_slice(image: &Arc<dyn Texture>, slice: u32) -> Option<u32> {
    // 2D images bind the whole level; array images bind the selected layer,
    // including layer 0. Array-ness is whether a second slice exists.
    image.is_valid_slice(1).then_some(slice)
}

fn depth_stencil_attachment_point(format: PixelFormat) -> u32 {
    if format.is_depth() && format.is_stencil() {
        GL_DEPTH_STENCIL_ATTACHMENT
    } else if format.is_depth() {
        GL_DEPTH_ATTACHMENT
    } else {
        GL_STENCIL_ATTACHMENT
    }
}

fn gl_compare_mode(mode: CompareMode) -> u32 {
    match mode {
        CompareMode::Less => GL_LESS,
        CompareMode::LessEqual => GL_LEQUAL,
        CompareMode::Equal => GL_EQUAL,
        CompareMode::GreaterEqual => GL_GEQUAL,
        CompareMode::Greater => GL_GREATER,
        CompareMode::NotEqual => GL_NOTEQUAL,
        CompareMode::Always => GL_ALWAYS,
        CompareMode::Never => GL_NEVER,
    }
}

fn gl_stencil_action(action: StencilAction) -> u32 {
    match action {
        StencilAction::Keep => GL_KEEP,
        StencilAction::Zero => GL_ZERO,
        StencilAction::Replace => GL_REPLACE,
        StencilAction::Increment => GL_INCR,
        StencilAction::Decrement => GL_DECR,
        StencilAction::IncrementWrap => GL_INCR_WRAP,
        StencilAction::DecrementWrap => GL_DECR_WRAP,
        StencilAction::Invert => GL_INVERT,
    }
}

fn gl_blend_operation(op: BlendOperation) -> u32 {
    match op {
        BlendOperation::Add => GL_FUNC_ADD,
        BlendOperation::Subtract => GL_FUNC_SUBTRACT,
        BlendOperation::ReverseSubtract => GL_FUNC_REVERSE_SUBTRACT,
        BlendOperation::Min => GL_MIN,
        BlendOperation::Max => GL_MAX,
    }
}

fn gl_blend_factor(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => GL_ZERO,
        BlendFactor::One => GL_ONE,
        BlendFactor::SrcColor => GL_SRC_COLOR,
        BlendFactor::OneMinusSrcColor => GL_ONE_MINUS_SRC_COLOR,
        BlendFactor::SrcAlpha => GL_SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => GL_ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstColor => GL_DST_COLOR,
        BlendFactor::OneMinusDstColor => GL_ONE_MINUS_DST_COLOR,
        BlendFactor::DstAlpha => GL_DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => GL_ONE_MINUS_DST_ALPHA,
        BlendFactor::SrcAlphaSaturated => GL_SRC_ALPHA_SATURATE,
    }
}

fn gl_primitive_type(primitive: PrimitiveType) -> u32 {
    match primitive {
        PrimitiveType::Points => GL_POINTS,
        PrimitiveType::Lines => GL_LINES,
        PrimitiveType::LineStrip => GL_LINE_STRIP,
        PrimitiveType::Triangles => GL_TRIANGLES,
        PrimitiveType::TriangleStrip => GL_TRIANGLE_STRIP,
        PrimitiveType::TriangleFan => GL_TRIANGLE_FAN,
    }
}

fn gl_index_type(index_type: IndexDataType) -> u32 {
    match index_type {
        IndexDataType::U16 => GL_UNSIGNED_SHORT,
        IndexDataType::U32 => GL_UNSIGNED_INT,
    }
}
